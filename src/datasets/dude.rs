//! Per-target layout: `<root>/<target>/receptor.pdb`, `crystal_ligand.mol2` and
//! `actives_final.sdf` (commonly gzipped).
//!
//! Each target yields its crystal ligand pair followed by one pair per accepted active, all
//! sharing the receptor encoding computed once per target.

use super::config::ExtractConfig;
use super::driver::{self, Layout, Outcome};
use super::error::{Error, RecordError};
use crate::io;
use crate::model::encoded::EncodedStructure;
use crate::ops;
use std::path::{Path, PathBuf};

const RECEPTOR: &str = "receptor.pdb";
const CRYSTAL_LIGAND: &str = "crystal_ligand.mol2";
const ACTIVES: &str = "actives_final.sdf";

pub struct Dude {
    dir: PathBuf,
    config: ExtractConfig,
}

impl Dude {
    pub fn new(dir: impl Into<PathBuf>, config: &ExtractConfig) -> Result<Self, Error> {
        let dir = dir.into();
        driver::require_dir(&dir)?;
        if !io::gzip_supported() {
            return Err(Error::missing_capability(
                "gzip",
                "DUD-E actives ship as actives_final.sdf.gz; rebuild with the `gzip` feature",
            ));
        }
        Ok(Self {
            dir,
            config: config.clone(),
        })
    }

    /// Encodes the receptor and crystal ligand, cutting the pocket around the ligand if asked.
    ///
    /// `Ok(None)` means the crystal ligand was rejected and the target contributes nothing.
    fn reference(
        &self,
        dir: &Path,
    ) -> Result<Option<(EncodedStructure, EncodedStructure)>, RecordError> {
        let table = io::read_pdb_file(&driver::locate(dir, RECEPTOR))?;
        let crystal = io::read_mol2_molecule_file(&driver::locate(dir, CRYSTAL_LIGAND))?;

        let whitelist = &self.config.allowed_atoms;
        let Some(crystal) = ops::extract_molecule(&crystal, whitelist)? else {
            return Ok(None);
        };

        let mut protein = ops::extract_protein(&table, &self.config.protein_filter(), whitelist)?;
        if self.config.return_pocket {
            protein = ops::select_pocket(&protein, &crystal, self.config.threshold)?;
        }

        Ok(Some((protein, crystal)))
    }

    fn actives(
        &self,
        dir: &Path,
        protein: &EncodedStructure,
        outcomes: &mut Vec<Result<Outcome, RecordError>>,
    ) {
        let path = driver::locate(dir, ACTIVES);
        if !path.exists() {
            outcomes.push(Err(RecordError::MissingLigand { path }));
            return;
        }

        let records = match io::read_sdf_file(&path) {
            Ok(records) => records,
            Err(err) => {
                outcomes.push(Err(err.into()));
                return;
            }
        };

        let whitelist = &self.config.allowed_atoms;
        for record in records {
            let outcome = record
                .map_err(RecordError::from)
                .and_then(|molecule| Ok(ops::extract_molecule(&molecule, whitelist)?))
                .map(|encoded| match encoded {
                    Some(ligand) => Outcome::Pair {
                        protein: protein.clone(),
                        ligand,
                    },
                    None => Outcome::Rejected,
                });
            outcomes.push(outcome);
        }
    }
}

impl Layout for Dude {
    type Candidate = (String, PathBuf);

    fn dataset(&self) -> &str {
        "dude"
    }

    fn candidates(&self) -> Result<Vec<Self::Candidate>, Error> {
        driver::list_subdirs(&self.dir, &[])
    }

    fn label(&self, candidate: &Self::Candidate) -> String {
        candidate.0.clone()
    }

    fn process(&self, (_, dir): &Self::Candidate) -> Vec<Result<Outcome, RecordError>> {
        let (protein, crystal) = match self.reference(dir) {
            Ok(Some(reference)) => reference,
            Ok(None) => return vec![Ok(Outcome::Rejected)],
            Err(err) => return vec![Err(err)],
        };

        let mut outcomes = vec![Ok(Outcome::Pair {
            protein: protein.clone(),
            ligand: crystal,
        })];
        self.actives(dir, &protein, &mut outcomes);
        outcomes
    }
}
