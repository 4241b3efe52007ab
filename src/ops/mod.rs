//! Extraction operations: the whitelist encoder, the small-molecule and protein extractors,
//! and distance-based pocket selection.
//!
//! Small molecules and proteins follow deliberately different policies. A ligand with any
//! non-whitelisted atom is rejected outright, while protein records are filtered atom by
//! atom. Both produce [`EncodedStructure`](crate::model::encoded::EncodedStructure) values.

mod error;
mod molecule;
mod pocket;
mod protein;
mod whitelist;

pub use whitelist::{AtomWhitelist, DEFAULT_ATOMS};

pub use molecule::extract_molecule;

pub use protein::{AtomNameMatch, ProteinFilter, extract_protein};

pub use pocket::select_pocket;

pub use error::Error;
