use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "I/O error for {path_desc}: {source}",
        path_desc = PathDisplay(path)
    )]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "failed to parse {format} {path_desc}: {details} (line {line_number})",
        path_desc = PathDisplay(path)
    )]
    Parse {
        format: &'static str,
        path: Option<PathBuf>,
        line_number: usize,
        details: String,
    },

    #[error(
        "inconsistent data in {format} {path_desc}: {details}",
        path_desc = PathDisplay(path)
    )]
    InconsistentData {
        format: &'static str,
        path: Option<PathBuf>,
        details: String,
    },

    #[error(
        "unsupported {format} input in {path_desc}: {details}",
        path_desc = PathDisplay(path)
    )]
    Unsupported {
        format: &'static str,
        path: Option<PathBuf>,
        details: String,
    },

    #[error(
        "failed to decode {format} {path_desc}: {details}",
        path_desc = PathDisplay(path)
    )]
    Decode {
        format: &'static str,
        path: Option<PathBuf>,
        details: String,
    },
}

impl Error {
    pub fn from_io(source: std::io::Error, path: Option<PathBuf>) -> Self {
        Self::Io { path, source }
    }

    pub fn parse(
        format: &'static str,
        path: Option<PathBuf>,
        line_number: usize,
        details: impl Into<String>,
    ) -> Self {
        Self::Parse {
            format,
            path,
            line_number,
            details: details.into(),
        }
    }

    pub fn inconsistent_data(
        format: &'static str,
        path: Option<PathBuf>,
        details: impl Into<String>,
    ) -> Self {
        Self::InconsistentData {
            format,
            path,
            details: details.into(),
        }
    }

    pub fn unsupported(
        format: &'static str,
        path: Option<PathBuf>,
        details: impl Into<String>,
    ) -> Self {
        Self::Unsupported {
            format,
            path,
            details: details.into(),
        }
    }

    pub fn decode(
        format: &'static str,
        path: Option<PathBuf>,
        details: impl Into<String>,
    ) -> Self {
        Self::Decode {
            format,
            path,
            details: details.into(),
        }
    }

    /// Attaches a file path to errors raised by stream readers that only knew line numbers.
    pub fn with_path(mut self, file: &Path) -> Self {
        match &mut self {
            Self::Io { path, .. }
            | Self::Parse { path, .. }
            | Self::InconsistentData { path, .. }
            | Self::Unsupported { path, .. }
            | Self::Decode { path, .. } => {
                if path.is_none() {
                    *path = Some(file.to_path_buf());
                }
            }
        }
        self
    }
}

struct PathDisplay<'a>(&'a Option<PathBuf>);

impl<'a> fmt::Display for PathDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(p) => write!(f, "file '{}'", p.display()),
            None => write!(f, "stream source"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_mentions_stream_source_without_path() {
        let err = Error::parse("PDB", None, 7, "Invalid X coordinate");
        assert_eq!(
            err.to_string(),
            "failed to parse PDB stream source: Invalid X coordinate (line 7)"
        );
    }

    #[test]
    fn with_path_fills_missing_path_only() {
        let err = Error::parse("SDF", None, 4, "invalid atom count").with_path(Path::new("a.sdf"));
        assert!(err.to_string().contains("file 'a.sdf'"));

        let err = Error::decode("index", Some(PathBuf::from("first.pkl")), "bad")
            .with_path(Path::new("second.pkl"));
        assert!(err.to_string().contains("first.pkl"));
    }
}
