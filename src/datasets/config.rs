use crate::ops::{AtomNameMatch, AtomWhitelist, ProteinFilter};
use serde::{Deserialize, Serialize};

/// Options recognized by every layout adapter.
///
/// Missing keys in a TOML or JSON document take their default values:
///
/// ```toml
/// return_pocket = true
/// threshold = 12.0
/// allowed_atoms = ["C", "N", "O", "S"]
/// atom_name_match = "leading-element"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    /// Restrict proteins to the binding pocket, from a pocket file or by distance.
    pub return_pocket: bool,
    pub remove_hydrogens: bool,
    pub keep_hetero: bool,
    pub allowed_atoms: AtomWhitelist,
    /// Pocket radius around the reference ligand centroid, in coordinate units.
    pub threshold: f64,
    pub atom_name_match: AtomNameMatch,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            return_pocket: false,
            remove_hydrogens: true,
            keep_hetero: false,
            allowed_atoms: AtomWhitelist::default(),
            threshold: 15.0,
            atom_name_match: AtomNameMatch::default(),
        }
    }
}

impl ExtractConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn protein_filter(&self) -> ProteinFilter {
        ProteinFilter {
            remove_hydrogens: self.remove_hydrogens,
            keep_hetero: self.keep_hetero,
            atom_name_match: self.atom_name_match,
        }
    }
}
