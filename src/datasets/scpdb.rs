//! Site-based layout: `<root>/<entry>/{protein,site}.mol2` + `ligand.sdf`.

use super::config::ExtractConfig;
use super::driver::{self, Layout, Outcome};
use super::error::{Error, RecordError};
use crate::io;
use crate::ops::{self, ProteinFilter};
use std::path::{Path, PathBuf};

pub struct ScPdb {
    dir: PathBuf,
    config: ExtractConfig,
}

impl ScPdb {
    pub fn new(dir: impl Into<PathBuf>, config: &ExtractConfig) -> Result<Self, Error> {
        let dir = dir.into();
        driver::require_dir(&dir)?;
        Ok(Self {
            dir,
            config: config.clone(),
        })
    }

    /// MOL2 tables have no heteroatom collection, so `keep_hetero` never applies.
    fn filter(&self) -> ProteinFilter {
        ProteinFilter {
            keep_hetero: false,
            ..self.config.protein_filter()
        }
    }

    fn process_entry(&self, dir: &Path) -> Result<Outcome, RecordError> {
        let protein_file = if self.config.return_pocket {
            "site.mol2"
        } else {
            "protein.mol2"
        };
        let table = io::read_mol2_table_file(&driver::locate(dir, protein_file))?;
        let molecule = io::read_first_sdf_file(&driver::locate(dir, "ligand.sdf"))?;

        let whitelist = &self.config.allowed_atoms;
        let Some(ligand) = ops::extract_molecule(&molecule, whitelist)? else {
            return Ok(Outcome::Rejected);
        };
        let protein = ops::extract_protein(&table, &self.filter(), whitelist)?;

        Ok(Outcome::Pair { protein, ligand })
    }
}

impl Layout for ScPdb {
    type Candidate = (String, PathBuf);

    fn dataset(&self) -> &str {
        "scPDB"
    }

    fn candidates(&self) -> Result<Vec<Self::Candidate>, Error> {
        driver::list_subdirs(&self.dir, &[])
    }

    fn label(&self, candidate: &Self::Candidate) -> String {
        candidate.0.clone()
    }

    fn process(&self, (_, dir): &Self::Candidate) -> Vec<Result<Outcome, RecordError>> {
        vec![self.process_entry(dir)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::testing::{mol2_block, sdf_record, write_file};
    use crate::ops::AtomNameMatch;
    use tempfile::TempDir;

    fn write_entry(root: &Path, entry: &str, ligand: &[(&str, [f64; 3])]) {
        write_file(
            root,
            &format!("{entry}/protein.mol2"),
            &mol2_block(
                entry,
                &[
                    ("N", "N.am", [0.0, 0.0, 0.0]),
                    ("CA", "C.3", [1.0, 0.0, 0.0]),
                    ("C", "C.2", [2.0, 0.0, 0.0]),
                    ("HA", "H", [1.0, 1.0, 0.0]),
                ],
            ),
        );
        write_file(
            root,
            &format!("{entry}/site.mol2"),
            &mol2_block(entry, &[("N", "N.am", [0.0, 0.0, 0.0])]),
        );
        write_file(root, &format!("{entry}/ligand.sdf"), &sdf_record(entry, ligand));
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        write_entry(dir.path(), "1a2b_1", &[("C", [0.0, 0.0, 0.0]), ("Cl", [1.8, 0.0, 0.0])]);
        write_entry(dir.path(), "3c4d_1", &[("C", [0.0, 0.0, 0.0]), ("As", [1.8, 0.0, 0.0])]);
        write_file(dir.path(), "5e6f_1/ligand.sdf", &sdf_record("x", &[("C", [0.0, 0.0, 0.0])]));
        dir
    }

    #[test]
    fn reads_protein_tables_from_mol2() {
        let dir = fixture();
        let batch = driver::run(&ScPdb::new(dir.path(), &ExtractConfig::default()).unwrap()).unwrap();
        let report = batch.report();

        assert_eq!(batch.len(), 1);
        assert_eq!(report.rejected, 1);
        assert_eq!(report.failed, 1);
        // Exact-name matching keeps N and C, drops CA and the hydrogen.
        assert_eq!(batch.proteins()[0].atom_count(), 2);
    }

    #[test]
    fn leading_element_match_and_site_files() {
        let dir = fixture();
        let config = ExtractConfig {
            atom_name_match: AtomNameMatch::LeadingElement,
            ..ExtractConfig::default()
        };
        let full = driver::run(&ScPdb::new(dir.path(), &config).unwrap()).unwrap();
        assert_eq!(full.proteins()[0].atom_count(), 3);

        let site = ExtractConfig {
            return_pocket: true,
            ..config
        };
        let pocket = driver::run(&ScPdb::new(dir.path(), &site).unwrap()).unwrap();
        assert_eq!(pocket.proteins()[0].atom_count(), 1);
    }

    #[test]
    fn keep_hetero_is_ignored() {
        let dir = fixture();
        let config = ExtractConfig {
            keep_hetero: true,
            ..ExtractConfig::default()
        };
        let with_het = driver::run(&ScPdb::new(dir.path(), &config).unwrap()).unwrap();
        let without = driver::run(&ScPdb::new(dir.path(), &ExtractConfig::default()).unwrap()).unwrap();
        assert_eq!(with_het, without);
    }
}
