use serde::Deserialize;
use std::fmt;

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct RegistryFile {
    #[serde(rename = "dataset")]
    pub datasets: Vec<DatasetEntry>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct DatasetEntry {
    pub name: String,
    pub layout: LayoutKind,
    pub subdirectory: bool,
    pub description: String,
}

/// On-disk organisation of a dataset, one per layout adapter.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    ComplexPerDirectory,
    IndexFile,
    TargetWithActives,
    SiteEntry,
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ComplexPerDirectory => "complex-per-directory",
            Self::IndexFile => "index-file",
            Self::TargetWithActives => "target-with-actives",
            Self::SiteEntry => "site-entry",
        };
        f.write_str(name)
    }
}
