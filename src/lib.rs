//! # BenchForge
//!
//! **BenchForge** turns protein-ligand benchmark datasets into paired coordinate and atom-type
//! tensors. It walks the on-disk layouts of PDBbind, CrossDocked, DUD-E and sc-PDB, parses the
//! protein and ligand files of each complex, and encodes every structure as an `N × 3`
//! coordinate matrix alongside an `N × K` one-hot element matrix over a user-chosen
//! whitelist.
//!
//! ## Features
//!
//! - **Layout adapters** – One driver per dataset convention (complex per directory, index
//!   file, target with actives, binding-site entry), all sharing a failure-isolating loop.
//! - **Two extraction policies** – Ligands are all-or-nothing against the whitelist, proteins
//!   are filtered atom by atom with a single mask for coordinates and types.
//! - **In-crate parsers** – PDB, Tripos MOL2 and multi-record SDF readers with line-accurate
//!   diagnostics, transparent `.gz` decompression and pickled index decoding.
//! - **Pocket selection** – Distance-based pocket cuts around a reference ligand centroid.
//! - **Embedded registry** – Dataset names resolve case-insensitively with fuzzy fallback.
//!
//! ## Example
//!
//! ```no_run
//! use bench_forge::datasets::{ExtractConfig, load_pairs};
//!
//! let config = ExtractConfig {
//!     return_pocket: true,
//!     ..ExtractConfig::default()
//! };
//! let batch = load_pairs("pdbbind", "data/refined-set", &config)?;
//! println!("{}", batch.report());
//! # Ok::<(), bench_forge::datasets::Error>(())
//! ```

mod model;

pub mod datasets;
pub mod db;
pub mod io;
pub mod ops;

pub use model::atom::Atom;
pub use model::encoded::{EncodedStructure, ShapeMismatch};
pub use model::molecule::Molecule;
pub use model::table::{AtomRecord, ProteinTable};
pub use model::types::Point;

pub use datasets::{BatchReport, ExtractConfig, ExtractionBatch, load_pairs};
pub use ops::{AtomNameMatch, AtomWhitelist};
