//! Core data structures flowing through extraction.
//!
//! Readers in [`crate::io`] produce [`Molecule`](molecule::Molecule) and
//! [`ProteinTable`](table::ProteinTable) records; the extractors in [`crate::ops`] turn them
//! into [`EncodedStructure`](encoded::EncodedStructure) values that the dataset adapters
//! accumulate.

pub mod atom;
pub mod encoded;
pub mod molecule;
pub mod table;
pub mod types;
