//! Layout adapters that walk benchmark dataset trees and pair protein and ligand encodings.
//!
//! [`load_pairs`] is the usual entry point: it resolves a dataset name against the registry,
//! constructs the matching adapter and runs it. Construction performs every setup check, so a
//! run that starts never aborts; per-record problems are counted in the [`BatchReport`].

mod batch;
mod config;
mod crossdock;
mod driver;
mod dude;
mod error;
mod pdbbind;
mod scpdb;

use crate::db::{self, DatasetView, LayoutKind};
use std::path::{Path, PathBuf};

pub use batch::{BatchReport, ExtractionBatch};
pub use config::ExtractConfig;
pub use crossdock::CrossDock;
pub use driver::{Layout, Outcome, run};
pub use dude::Dude;
pub use error::{Error, RecordError};
pub use pdbbind::PdbBind;
pub use scpdb::ScPdb;

/// Directory holding `dataset` beneath the data root.
pub fn dataset_dir(dataset: &DatasetView, root: &Path) -> PathBuf {
    if dataset.in_subdirectory() {
        root.join(dataset.name())
    } else {
        root.to_path_buf()
    }
}

/// Resolves `name`, builds its adapter over `root` and extracts every pair.
///
/// # Errors
///
/// Only setup failures are returned: an unknown name, a missing directory or index, or a
/// disabled capability the layout needs.
pub fn load_pairs(
    name: &str,
    root: impl AsRef<Path>,
    config: &ExtractConfig,
) -> Result<ExtractionBatch, Error> {
    let dataset = db::resolve(name).ok_or_else(|| Error::UnknownDataset {
        query: name.to_string(),
    })?;
    let dir = dataset_dir(&dataset, root.as_ref());
    log::info!("loading {} from '{}'", dataset.name(), dir.display());

    match dataset.layout() {
        LayoutKind::ComplexPerDirectory => run(&PdbBind::new(dir, config)?),
        LayoutKind::IndexFile => run(&CrossDock::new(dir, config)?),
        LayoutKind::TargetWithActives => run(&Dude::new(dir, config)?),
        LayoutKind::SiteEntry => run(&ScPdb::new(dir, config)?),
    }
}
