mod error;
mod index;
mod json;
mod mol2;
mod pdb;
mod sdf;
mod source;

#[cfg(test)]
pub(crate) mod testing;

use crate::model::{molecule::Molecule, table::ProteinTable};
use std::path::Path;

pub use pdb::reader::read as read_pdb_table;

pub use mol2::reader::{read_molecule as read_mol2_molecule, read_table as read_mol2_table};

pub use sdf::reader::{SdfRecords, read_all as read_sdf_records, read_first as read_first_sdf};

pub use index::reader::{IndexEntry, IndexFormat, read as read_index, read_path as read_index_file};

pub use source::{gzip_supported, open};

pub use json::write_json;

pub use error::Error;

/// Reads a PDB file (optionally gzipped) into a protein table.
pub fn read_pdb_file(path: &Path) -> Result<ProteinTable, Error> {
    read_pdb_table(open(path)?).map_err(|e| e.with_path(path))
}

/// Reads the first molecule of a MOL2 file as a protein table.
pub fn read_mol2_table_file(path: &Path) -> Result<ProteinTable, Error> {
    read_mol2_table(open(path)?).map_err(|e| e.with_path(path))
}

/// Reads the first molecule of a MOL2 file as a small molecule.
pub fn read_mol2_molecule_file(path: &Path) -> Result<Molecule, Error> {
    read_mol2_molecule(open(path)?).map_err(|e| e.with_path(path))
}

/// Reads the first record of an SDF file.
pub fn read_first_sdf_file(path: &Path) -> Result<Molecule, Error> {
    read_first_sdf(open(path)?).map_err(|e| e.with_path(path))
}

/// Streams every record of an SDF file; per-record errors carry the file path.
pub fn read_sdf_file(
    path: &Path,
) -> Result<impl Iterator<Item = Result<Molecule, Error>> + use<>, Error> {
    let owned = path.to_path_buf();
    let records = read_sdf_records(open(path)?);
    Ok(records.map(move |record| record.map_err(|e| e.with_path(&owned))))
}

/// Protein-side file formats a dataset may store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureFormat {
    Pdb,
    Mol2,
}

/// Ligand-side file formats a dataset may store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LigandFormat {
    Sdf,
    Mol2,
}

impl StructureFormat {
    /// Guesses the format from the extension, looking through a trailing `.gz`.
    pub fn from_path(path: &Path) -> Option<Self> {
        match inner_extension(path)?.as_str() {
            "pdb" | "ent" => Some(Self::Pdb),
            "mol2" => Some(Self::Mol2),
            _ => None,
        }
    }

    pub fn read(self, path: &Path) -> Result<ProteinTable, Error> {
        match self {
            Self::Pdb => read_pdb_file(path),
            Self::Mol2 => read_mol2_table_file(path),
        }
    }
}

impl LigandFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match inner_extension(path)?.as_str() {
            "sdf" | "mol" => Some(Self::Sdf),
            "mol2" => Some(Self::Mol2),
            _ => None,
        }
    }

    /// Reads the first ligand record of the file.
    pub fn read_first(self, path: &Path) -> Result<Molecule, Error> {
        match self {
            Self::Sdf => read_first_sdf_file(path),
            Self::Mol2 => read_mol2_molecule_file(path),
        }
    }
}

fn inner_extension(path: &Path) -> Option<String> {
    let path = if source::is_gzip(path) {
        Path::new(path.file_stem()?)
    } else {
        path
    };
    Some(path.extension()?.to_str()?.to_ascii_lowercase())
}
