//! Shared candidate loop for the layout adapters.

use super::batch::ExtractionBatch;
use super::error::{Error, RecordError};
use crate::model::encoded::EncodedStructure;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Result of processing one protein-ligand candidate without error.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Pair {
        protein: EncodedStructure,
        ligand: EncodedStructure,
    },
    /// The ligand carried an element outside the whitelist.
    Rejected,
    /// The index row had no pocket or ligand reference; nothing was read.
    Unreferenced,
}

/// A dataset layout that can enumerate and process its candidates.
pub trait Layout {
    type Candidate;

    /// Registry name, used in log lines.
    fn dataset(&self) -> &str;

    /// Lists the work items. Errors here are setup failures and abort the run.
    fn candidates(&self) -> Result<Vec<Self::Candidate>, Error>;

    fn label(&self, candidate: &Self::Candidate) -> String;

    /// Processes one candidate. Layouts pairing one protein with many ligands return one
    /// outcome per ligand.
    fn process(&self, candidate: &Self::Candidate) -> Vec<Result<Outcome, RecordError>>;
}

/// Walks every candidate of `layout`, folding outcomes into a batch.
///
/// Record errors are logged and counted; only `candidates()` can fail the run.
pub fn run<L: Layout>(layout: &L) -> Result<ExtractionBatch, Error> {
    let candidates = layout.candidates()?;
    info!(
        "{}: processing {} candidate entries",
        layout.dataset(),
        candidates.len()
    );

    let mut batch = ExtractionBatch::new();
    for candidate in &candidates {
        let label = layout.label(candidate);
        debug!("{}: {label}", layout.dataset());

        for outcome in layout.process(candidate) {
            match outcome {
                Ok(Outcome::Pair { protein, ligand }) => batch.push_pair(protein, ligand),
                Ok(Outcome::Rejected) => {
                    debug!("{}: {label}: ligand rejected by whitelist", layout.dataset());
                    batch.count_rejected();
                }
                Ok(Outcome::Unreferenced) => batch.count_unreferenced(),
                Err(err) => {
                    let failures = batch.count_failed();
                    warn!("{}: failure {failures} at {label}: {err}", layout.dataset());
                }
            }
        }
    }

    info!("{}: {}", layout.dataset(), batch.report());
    Ok(batch)
}

/// Fails fast when a dataset directory is missing.
pub(crate) fn require_dir(path: &Path) -> Result<(), Error> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(Error::RootNotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Subdirectories of `dir`, sorted by name. Hidden entries and any name in `skip` are left out.
pub(crate) fn list_subdirs(dir: &Path, skip: &[&str]) -> Result<Vec<(String, PathBuf)>, Error> {
    let entries = fs::read_dir(dir).map_err(|e| Error::listing(dir, e))?;

    let mut subdirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::listing(dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || skip.contains(&name.as_str()) {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            subdirs.push((name, path));
        }
    }

    subdirs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(subdirs)
}

/// `dir/name`, or `dir/name.gz` when only the compressed file exists.
pub(crate) fn locate(dir: &Path, name: &str) -> PathBuf {
    let plain = dir.join(name);
    if plain.exists() {
        return plain;
    }
    let compressed = dir.join(format!("{name}.gz"));
    if compressed.exists() { compressed } else { plain }
}
