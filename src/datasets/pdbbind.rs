//! Complex-per-directory layout: `<root>/<id>/<id>_{protein,pocket}.pdb` + `<id>_ligand.sdf`.

use super::config::ExtractConfig;
use super::driver::{self, Layout, Outcome};
use super::error::{Error, RecordError};
use crate::io;
use crate::ops::{self, ProteinFilter};
use std::path::{Path, PathBuf};

/// Top-level entries that are metadata, not complexes.
const NON_COMPLEX_ENTRIES: [&str; 2] = ["readme", "index"];

pub struct PdbBind {
    dir: PathBuf,
    config: ExtractConfig,
}

impl PdbBind {
    pub fn new(dir: impl Into<PathBuf>, config: &ExtractConfig) -> Result<Self, Error> {
        let dir = dir.into();
        driver::require_dir(&dir)?;
        Ok(Self {
            dir,
            config: config.clone(),
        })
    }

    fn filter(&self) -> ProteinFilter {
        self.config.protein_filter()
    }

    fn process_complex(&self, id: &str, dir: &Path) -> Result<Outcome, RecordError> {
        let variant = if self.config.return_pocket {
            "pocket"
        } else {
            "protein"
        };
        let table = io::read_pdb_file(&driver::locate(dir, &format!("{id}_{variant}.pdb")))?;
        let molecule = io::read_first_sdf_file(&driver::locate(dir, &format!("{id}_ligand.sdf")))?;

        let whitelist = &self.config.allowed_atoms;
        let Some(ligand) = ops::extract_molecule(&molecule, whitelist)? else {
            return Ok(Outcome::Rejected);
        };
        let protein = ops::extract_protein(&table, &self.filter(), whitelist)?;

        Ok(Outcome::Pair { protein, ligand })
    }
}

impl Layout for PdbBind {
    type Candidate = (String, PathBuf);

    fn dataset(&self) -> &str {
        "pdbbind"
    }

    fn candidates(&self) -> Result<Vec<Self::Candidate>, Error> {
        driver::list_subdirs(&self.dir, &NON_COMPLEX_ENTRIES)
    }

    fn label(&self, candidate: &Self::Candidate) -> String {
        candidate.0.clone()
    }

    fn process(&self, (id, dir): &Self::Candidate) -> Vec<Result<Outcome, RecordError>> {
        vec![self.process_complex(id, dir)]
    }
}
