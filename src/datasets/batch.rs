use crate::model::encoded::EncodedStructure;
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};
use std::fmt;

/// Per-run tallies.
///
/// Every outcome lands in exactly one of `pairs`, `rejected`, `failed` or `unreferenced`,
/// and `candidates` is their sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub candidates: usize,
    pub pairs: usize,
    /// Ligands turned away by the whitelist.
    pub rejected: usize,
    /// Records that raised a parse, I/O or extraction error.
    pub failed: usize,
    /// Index rows without a pocket or ligand reference.
    pub unreferenced: usize,
}

impl BatchReport {
    pub fn skipped(&self) -> usize {
        self.rejected + self.failed
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pairs from {} candidates ({} rejected, {} failed, {} unreferenced)",
            self.pairs, self.candidates, self.rejected, self.failed, self.unreferenced
        )
    }
}

/// Paired protein and ligand encodings produced by one adapter run.
///
/// The i-th protein belongs with the i-th ligand; the two lists only grow together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionBatch {
    proteins: Vec<EncodedStructure>,
    ligands: Vec<EncodedStructure>,
    report: BatchReport,
}

impl ExtractionBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_pair(&mut self, protein: EncodedStructure, ligand: EncodedStructure) {
        self.proteins.push(protein);
        self.ligands.push(ligand);
        self.report.candidates += 1;
        self.report.pairs += 1;
    }

    pub(crate) fn count_rejected(&mut self) {
        self.report.candidates += 1;
        self.report.rejected += 1;
    }

    /// Records a failure and returns the running failure count.
    pub(crate) fn count_failed(&mut self) -> usize {
        self.report.candidates += 1;
        self.report.failed += 1;
        self.report.failed
    }

    pub(crate) fn count_unreferenced(&mut self) {
        self.report.candidates += 1;
        self.report.unreferenced += 1;
    }

    pub fn len(&self) -> usize {
        self.proteins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proteins.is_empty()
    }

    pub fn proteins(&self) -> &[EncodedStructure] {
        &self.proteins
    }

    pub fn ligands(&self) -> &[EncodedStructure] {
        &self.ligands
    }

    pub fn report(&self) -> BatchReport {
        self.report
    }

    /// Iterates `(protein, ligand)` pairs in insertion order.
    pub fn pairs(&self) -> impl Iterator<Item = (&EncodedStructure, &EncodedStructure)> {
        self.proteins.iter().zip(self.ligands.iter())
    }

    pub fn into_parts(self) -> (Vec<EncodedStructure>, Vec<EncodedStructure>, BatchReport) {
        (self.proteins, self.ligands, self.report)
    }
}

/// One side of the batch laid out column-wise: all coordinate blocks, then all type blocks.
struct Side<'a>(&'a [EncodedStructure]);

impl Serialize for Side<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let coords: Vec<Vec<[f64; 3]>> = self.0.iter().map(|s| s.coord_rows()).collect();
        let types: Vec<Vec<Vec<f64>>> = self.0.iter().map(|s| s.type_rows()).collect();

        let mut state = serializer.serialize_struct("Side", 2)?;
        state.serialize_field("coord", &coords)?;
        state.serialize_field("atom_type", &types)?;
        state.end()
    }
}

impl Serialize for ExtractionBatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ExtractionBatch", 3)?;
        state.serialize_field("protein", &Side(&self.proteins))?;
        state.serialize_field("ligand", &Side(&self.ligands))?;
        state.serialize_field("report", &self.report)?;
        state.end()
    }
}
