//! Index-driven layout: `<root>/index.pkl` lists `(pocket, ligand, protein, rmsd)` rows whose
//! paths are relative to `<root>/crossdocked_pocket10/`.
//!
//! Only pocket files are shipped, so pockets are used whether or not `return_pocket` is set.

use super::config::ExtractConfig;
use super::driver::{self, Layout, Outcome};
use super::error::{Error, RecordError};
use crate::io::{self, IndexEntry, IndexFormat};
use crate::ops;
use log::debug;
use std::path::{Path, PathBuf};

const INDEX_CANDIDATES: [&str; 2] = ["index.pkl", "index.json"];
const STRUCTURE_DIR: &str = "crossdocked_pocket10";

pub struct CrossDock {
    index: PathBuf,
    structures: PathBuf,
    config: ExtractConfig,
}

impl CrossDock {
    /// Checks the directory, locates the index and verifies it can be decoded.
    pub fn new(dir: impl Into<PathBuf>, config: &ExtractConfig) -> Result<Self, Error> {
        let dir = dir.into();
        driver::require_dir(&dir)?;

        let index = find_index(&dir)?;

        if !config.return_pocket {
            debug!("crossdock: full receptors are not distributed, reading pocket files");
        }

        Ok(Self {
            index,
            structures: dir.join(STRUCTURE_DIR),
            config: config.clone(),
        })
    }

    fn process_entry(&self, entry: &IndexEntry) -> Result<Outcome, RecordError> {
        let Some((pocket, ligand)) = entry.pair() else {
            return Ok(Outcome::Unreferenced);
        };

        let table = io::read_pdb_file(&self.structures.join(pocket))?;
        let molecule = io::read_first_sdf_file(&self.structures.join(ligand))?;

        let whitelist = &self.config.allowed_atoms;
        let Some(ligand) = ops::extract_molecule(&molecule, whitelist)? else {
            return Ok(Outcome::Rejected);
        };
        let protein = ops::extract_protein(&table, &self.config.protein_filter(), whitelist)?;

        Ok(Outcome::Pair { protein, ligand })
    }
}

/// First index this build can decode, in `INDEX_CANDIDATES` order.
fn find_index(dir: &Path) -> Result<PathBuf, Error> {
    let present: Vec<PathBuf> = INDEX_CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .filter(|path| path.is_file())
        .collect();

    if let Some(index) = present.iter().find(|path| {
        IndexFormat::from_path(path).is_some_and(IndexFormat::is_supported)
    }) {
        return Ok(index.clone());
    }

    match present.first() {
        Some(unsupported) => Err(Error::missing_capability(
            "pickle",
            format!(
                "'{}' is a pickle; rebuild with the `pickle` feature or provide index.json",
                unsupported.display()
            ),
        )),
        None => Err(Error::Index(io::Error::from_io(
            std::io::Error::from(std::io::ErrorKind::NotFound),
            Some(dir.join(INDEX_CANDIDATES[0])),
        ))),
    }
}

impl Layout for CrossDock {
    type Candidate = (usize, IndexEntry);

    fn dataset(&self) -> &str {
        "crossdock"
    }

    fn candidates(&self) -> Result<Vec<Self::Candidate>, Error> {
        let entries = io::read_index_file(&self.index).map_err(Error::Index)?;
        Ok(entries.into_iter().enumerate().collect())
    }

    fn label(&self, (row, entry): &Self::Candidate) -> String {
        match &entry.ligand {
            Some(ligand) => format!("row {row} ({ligand})"),
            None => format!("row {row}"),
        }
    }

    fn process(&self, (_, entry): &Self::Candidate) -> Vec<Result<Outcome, RecordError>> {
        vec![self.process_entry(entry)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::testing::{pdb_document, sdf_record, write_file};
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let pocket = pdb_document(&[("N", [0.0, 0.0, 0.0]), ("O", [1.0, 1.0, 1.0])], &[]);
        write_file(root, "crossdocked_pocket10/T1/a_pocket10.pdb", &pocket);
        write_file(
            root,
            "crossdocked_pocket10/T1/a_lig.sdf",
            &sdf_record("a", &[("C", [0.0, 0.0, 0.0])]),
        );
        write_file(
            root,
            "crossdocked_pocket10/T1/b_lig.sdf",
            &sdf_record("b", &[("I", [0.0, 0.0, 0.0]), ("Se", [1.0, 0.0, 0.0])]),
        );
        write_file(
            root,
            "index.json",
            r#"[
                ["T1/a_pocket10.pdb", "T1/a_lig.sdf", "T1/a_rec.pdb", 0.4],
                [null, "T1/a_lig.sdf", "T1/a_rec.pdb", 0.4],
                ["T1/a_pocket10.pdb", null, null, null],
                ["T1/a_pocket10.pdb", "T1/b_lig.sdf", "T1/a_rec.pdb", "1.1"],
                ["T1/missing.pdb", "T1/a_lig.sdf", "T1/a_rec.pdb", 2.0]
            ]"#,
        );
        dir
    }

    #[test]
    fn walks_index_rows_and_skips_unreferenced_pairs() {
        let dir = fixture();
        let adapter = CrossDock::new(dir.path(), &ExtractConfig::default()).unwrap();

        let batch = driver::run(&adapter).unwrap();
        let report = batch.report();

        assert_eq!(batch.len(), 1);
        assert_eq!(batch.proteins().len(), batch.ligands().len());
        assert_eq!(report.unreferenced, 2);
        assert_eq!(report.rejected, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(batch.proteins()[0].atom_count(), 2);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let dir = fixture();
        let adapter = CrossDock::new(dir.path(), &ExtractConfig::default()).unwrap();
        assert_eq!(driver::run(&adapter).unwrap(), driver::run(&adapter).unwrap());
    }

    #[test]
    fn missing_index_is_a_setup_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            CrossDock::new(dir.path(), &ExtractConfig::default()),
            Err(Error::Index(_))
        ));
    }

    #[test]
    fn malformed_index_aborts_before_any_record() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "index.json", "{ not an index");
        let adapter = CrossDock::new(dir.path(), &ExtractConfig::default()).unwrap();
        assert!(matches!(driver::run(&adapter), Err(Error::Index(_))));
    }

    #[cfg(not(feature = "pickle"))]
    #[test]
    fn pickle_index_requires_the_capability() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "index.pkl", "");
        assert!(matches!(
            CrossDock::new(dir.path(), &ExtractConfig::default()),
            Err(Error::MissingCapability { .. })
        ));
    }

    #[cfg(not(feature = "pickle"))]
    #[test]
    fn json_index_is_used_when_pickle_is_unavailable() {
        let dir = fixture();
        write_file(dir.path(), "index.pkl", "");

        let adapter = CrossDock::new(dir.path(), &ExtractConfig::default()).unwrap();
        assert_eq!(adapter.index, dir.path().join("index.json"));
        assert_eq!(driver::run(&adapter).unwrap().len(), 1);
    }

    #[cfg(feature = "pickle")]
    #[test]
    fn pickle_index_is_preferred_when_supported() {
        let dir = fixture();
        write_file(dir.path(), "index.pkl", "");

        let adapter = CrossDock::new(dir.path(), &ExtractConfig::default()).unwrap();
        assert_eq!(adapter.index, dir.path().join("index.pkl"));
    }
}
