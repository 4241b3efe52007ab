use super::types::Point;
use smol_str::SmolStr;
use std::fmt;

/// One row of a protein atom table, as read from an `ATOM`/`HETATM` record or a MOL2
/// `@<TRIPOS>ATOM` line.
///
/// `atom_name` is kept exactly as the file spells it (trimmed); protein extraction filters
/// and encodes from this field rather than from `element`.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    pub serial: i64,
    pub atom_name: SmolStr,
    pub alt_loc: Option<char>,
    pub residue_name: SmolStr,
    pub chain_id: SmolStr,
    pub residue_id: i32,
    pub element: Option<SmolStr>,
    pub pos: Point,
}

impl AtomRecord {
    /// Creates a record with only the fields extraction needs; residue context is blank.
    pub fn new(serial: i64, atom_name: &str, pos: Point) -> Self {
        Self {
            serial,
            atom_name: SmolStr::new(atom_name),
            alt_loc: None,
            residue_name: SmolStr::default(),
            chain_id: SmolStr::default(),
            residue_id: 0,
            element: None,
            pos,
        }
    }

    /// Hydrogen test used by the extractor: the atom name starts with `H`.
    pub fn is_hydrogen_named(&self) -> bool {
        self.atom_name.starts_with('H')
    }

    /// First character of the atom name, the symbol handed to the encoder.
    pub fn leading_symbol(&self) -> Option<&str> {
        let first = self.atom_name.chars().next()?;
        Some(&self.atom_name[..first.len_utf8()])
    }
}

/// Protein atoms split into the standard and heteroatom collections.
///
/// MOL2 sources have no heteroatom concept, so their tables carry an empty `hetero` list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProteinTable {
    pub atoms: Vec<AtomRecord>,
    pub hetero: Vec<AtomRecord>,
}

impl ProteinTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_atoms(atoms: Vec<AtomRecord>) -> Self {
        Self {
            atoms,
            hetero: Vec::new(),
        }
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn hetero_count(&self) -> usize {
        self.hetero.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty() && self.hetero.is_empty()
    }

    /// Iterates the standard atoms, followed by the heteroatoms when `with_hetero` is set.
    pub fn iter_records(&self, with_hetero: bool) -> impl Iterator<Item = &AtomRecord> {
        let hetero: &[AtomRecord] = if with_hetero { &self.hetero } else { &[] };
        self.atoms.iter().chain(hetero.iter())
    }
}

impl fmt::Display for ProteinTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ProteinTable {{ atoms: {}, hetero: {} }}",
            self.atom_count(),
            self.hetero_count()
        )
    }
}
