use crate::{io, ops};
use std::path::PathBuf;
use thiserror::Error;

/// Setup-time failure that aborts a whole run before any record is read.
#[derive(Debug, Error)]
pub enum Error {
    #[error("dataset directory '{}' does not exist", path.display())]
    RootNotFound { path: PathBuf },

    #[error("missing structural parser capability '{capability}': {details}")]
    MissingCapability {
        capability: &'static str,
        details: String,
    },

    #[error("unknown dataset '{query}'")]
    UnknownDataset { query: String },

    #[error("failed to read pair index: {0}")]
    Index(#[source] io::Error),

    #[error("I/O error listing '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn missing_capability(capability: &'static str, details: impl Into<String>) -> Self {
        Self::MissingCapability {
            capability,
            details: details.into(),
        }
    }

    pub fn listing(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failure confined to one candidate; it is counted and the run moves on.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Extract(#[from] ops::Error),

    #[error("no ligand file found at '{}'", path.display())]
    MissingLigand { path: PathBuf },
}
