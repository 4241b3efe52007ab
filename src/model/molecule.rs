use super::atom::Atom;
use std::fmt;

/// A parsed small molecule with a single conformer.
///
/// Atoms keep the order in which the source file lists them; extraction relies on that
/// order to pair coordinate rows with one-hot rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Molecule {
    pub name: String,
    atoms: Vec<Atom>,
}

impl Molecule {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            atoms: Vec::new(),
        }
    }

    pub fn with_atoms(name: &str, atoms: Vec<Atom>) -> Self {
        Self {
            name: name.to_string(),
            atoms,
        }
    }

    pub fn add_atom(&mut self, atom: Atom) {
        self.atoms.push(atom);
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn iter_atoms(&self) -> std::slice::Iter<'_, Atom> {
        self.atoms.iter()
    }
}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Molecule {{ name: \"{}\", atoms: {} }}",
            self.name,
            self.atom_count()
        )
    }
}
