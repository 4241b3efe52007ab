use crate::io::error::Error;
use crate::model::{
    atom::Atom,
    molecule::Molecule,
    table::{AtomRecord, ProteinTable},
    types::{Point, sybyl_element},
};
use smol_str::SmolStr;
use std::collections::HashSet;
use std::io::BufRead;

const FORMAT: &str = "MOL2";

/// One `@<TRIPOS>ATOM` line.
#[derive(Debug, Clone, PartialEq)]
struct Mol2Atom {
    id: usize,
    name: String,
    pos: Point,
    atom_type: String,
    subst_id: i32,
    subst_name: String,
}

struct Mol2Block {
    name: String,
    atoms: Vec<Mol2Atom>,
}

/// Reads the first molecule of a MOL2 source as a protein atom table.
///
/// The `atom_name` column becomes the record's atom name, the substructure columns become
/// residue context, and the element is derived from the SYBYL atom type. MOL2 carries no
/// heteroatom split, so `hetero` stays empty.
pub fn read_table<R: BufRead>(reader: R) -> Result<ProteinTable, Error> {
    let block = read_block(reader)?;

    let atoms = block
        .atoms
        .into_iter()
        .map(|atom| {
            let element = sybyl_element(&atom.atom_type);
            AtomRecord {
                serial: atom.id as i64,
                atom_name: SmolStr::new(&atom.name),
                alt_loc: None,
                residue_name: SmolStr::new(&atom.subst_name),
                chain_id: SmolStr::default(),
                residue_id: atom.subst_id,
                element: (!element.is_empty()).then(|| SmolStr::new(element)),
                pos: atom.pos,
            }
        })
        .collect();

    Ok(ProteinTable::from_atoms(atoms))
}

/// Reads the first molecule of a MOL2 source as a small molecule.
///
/// Element symbols come from the SYBYL atom type prefix (`C.ar` → `C`).
pub fn read_molecule<R: BufRead>(reader: R) -> Result<Molecule, Error> {
    let block = read_block(reader)?;

    let mut molecule = Molecule::new(&block.name);
    for atom in block.atoms {
        let element = sybyl_element(&atom.atom_type);
        if element.is_empty() {
            return Err(Error::inconsistent_data(
                FORMAT,
                None,
                format!(
                    "Atom {} has atom type '{}' without an element prefix",
                    atom.id, atom.atom_type
                ),
            ));
        }
        molecule.add_atom(Atom::new(&atom.name, &element, atom.pos));
    }

    Ok(molecule)
}

fn read_block<R: BufRead>(reader: R) -> Result<Mol2Block, Error> {
    let mut section = Section::None;
    let mut molecule_lines_seen = 0usize;
    let mut molecules_seen = 0usize;

    let mut molecule_name: Option<String> = None;
    let mut expected_atoms: Option<usize> = None;

    let mut atoms: Vec<Mol2Atom> = Vec::new();
    let mut seen_ids: HashSet<usize> = HashSet::new();

    for (idx, line_res) in reader.lines().enumerate() {
        let line = line_res.map_err(|e| Error::from_io(e, None))?;
        let line_number = idx + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(header) = trimmed.strip_prefix("@<TRIPOS>") {
            section = match header {
                "MOLECULE" => {
                    molecules_seen += 1;
                    if molecules_seen > 1 {
                        break;
                    }
                    molecule_lines_seen = 0;
                    Section::Molecule
                }
                "ATOM" => Section::Atom,
                _ => Section::None,
            };
            continue;
        }

        match section {
            Section::Molecule => {
                molecule_lines_seen += 1;
                match molecule_lines_seen {
                    1 => molecule_name = Some(trimmed.to_string()),
                    2 => expected_atoms = Some(parse_expected_atoms(trimmed, line_number)?),
                    _ => {}
                }
            }
            Section::Atom => {
                let atom = parse_atom_line(trimmed, line_number)?;
                if !seen_ids.insert(atom.id) {
                    return Err(Error::parse(
                        FORMAT,
                        None,
                        line_number,
                        format!("Duplicate atom id {}", atom.id),
                    ));
                }
                atoms.push(atom);
            }
            Section::None => {}
        }
    }

    let name = molecule_name.ok_or_else(|| {
        Error::parse(
            FORMAT,
            None,
            0,
            "Missing @<TRIPOS>MOLECULE section with molecule name",
        )
    })?;

    if atoms.is_empty() {
        return Err(Error::parse(
            FORMAT,
            None,
            0,
            "Missing or empty @<TRIPOS>ATOM section",
        ));
    }

    if let Some(expected) = expected_atoms {
        if expected != atoms.len() {
            return Err(Error::inconsistent_data(
                FORMAT,
                None,
                format!("Declared {expected} atoms but parsed {}", atoms.len()),
            ));
        }
    }

    Ok(Mol2Block { name, atoms })
}

enum Section {
    None,
    Molecule,
    Atom,
}

fn parse_expected_atoms(line: &str, line_number: usize) -> Result<usize, Error> {
    let field = line.split_whitespace().next().ok_or_else(|| {
        Error::parse(
            FORMAT,
            None,
            line_number,
            "Molecule counts line must specify the atom count",
        )
    })?;
    field
        .parse::<usize>()
        .map_err(|_| Error::parse(FORMAT, None, line_number, "Invalid atom count"))
}

fn parse_atom_line(line: &str, line_number: usize) -> Result<Mol2Atom, Error> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 6 {
        return Err(Error::parse(
            FORMAT,
            None,
            line_number,
            "ATOM record must include id, name, coordinates, and atom type",
        ));
    }

    let id = tokens[0]
        .parse::<usize>()
        .map_err(|_| Error::parse(FORMAT, None, line_number, "Invalid atom id"))?;
    if id == 0 {
        return Err(Error::parse(
            FORMAT,
            None,
            line_number,
            "Atom id must be positive",
        ));
    }

    let coord = |i: usize, axis: &str| {
        tokens[i].parse::<f64>().map_err(|_| {
            Error::parse(
                FORMAT,
                None,
                line_number,
                format!("Invalid {axis} coordinate"),
            )
        })
    };
    let pos = Point::new(coord(2, "X")?, coord(3, "Y")?, coord(4, "Z")?);

    let subst_id = tokens
        .get(6)
        .and_then(|t| t.parse::<i32>().ok())
        .unwrap_or(0);
    let subst_name = tokens.get(7).copied().unwrap_or("").to_string();

    Ok(Mol2Atom {
        id,
        name: tokens[1].to_string(),
        pos,
        atom_type: tokens[5].to_string(),
        subst_id,
        subst_name,
    })
}
