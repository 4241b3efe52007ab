use crate::model::{encoded::EncodedStructure, molecule::Molecule, types::Point};
use crate::ops::error::Error;
use crate::ops::whitelist::AtomWhitelist;

/// Encodes a small molecule under the strict whitelist policy.
///
/// Every atom must carry a whitelisted element; a single outsider rejects the whole
/// molecule. Accepted molecules keep one row per atom in file order.
///
/// # Arguments
///
/// * `molecule` - Parsed ligand, single conformer.
/// * `whitelist` - Element order defining the one-hot columns.
///
/// # Returns
///
/// `Ok(Some(_))` when accepted, `Ok(None)` when rejected. Rejection is a normal outcome and
/// is never reported as an error.
pub fn extract_molecule(
    molecule: &Molecule,
    whitelist: &AtomWhitelist,
) -> Result<Option<EncodedStructure>, Error> {
    let mut positions: Vec<Point> = Vec::with_capacity(molecule.atom_count());
    let mut indices: Vec<usize> = Vec::with_capacity(molecule.atom_count());

    for atom in molecule.iter_atoms() {
        match whitelist.index_of(&atom.element) {
            Some(index) => {
                positions.push(atom.pos);
                indices.push(index);
            }
            None => return Ok(None),
        }
    }

    Ok(Some(EncodedStructure::from_indices(
        &positions,
        &indices,
        whitelist.len(),
    )?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::atom::Atom;

    fn molecule(symbols: &[&str]) -> Molecule {
        let atoms = symbols
            .iter()
            .enumerate()
            .map(|(i, s)| Atom::new(s, s, Point::new(i as f64, 2.0 * i as f64, -(i as f64))))
            .collect();
        Molecule::with_atoms("lig", atoms)
    }

    #[test]
    fn accepts_fully_whitelisted_molecule() {
        let whitelist = AtomWhitelist::new(["C", "N", "O"]).unwrap();
        let encoded = extract_molecule(&molecule(&["C", "N", "O", "C"]), &whitelist)
            .unwrap()
            .unwrap();

        assert_eq!(encoded.coords().shape(), (4, 3));
        assert_eq!(encoded.atom_types().shape(), (4, 3));
        assert_eq!(
            encoded.type_indices(),
            vec![Some(0), Some(1), Some(2), Some(0)]
        );
        assert_eq!(encoded.position(3), Point::new(3.0, 6.0, -3.0));
    }

    #[test]
    fn type_rows_match_single_symbol_encoding() {
        let whitelist = AtomWhitelist::new(["C", "N", "O", "S"]).unwrap();
        let symbols = ["S", "C", "O"];
        let encoded = extract_molecule(&molecule(&symbols), &whitelist)
            .unwrap()
            .unwrap();

        let expected: Vec<Vec<f64>> = symbols
            .iter()
            .map(|s| whitelist.one_hot(s).unwrap())
            .collect();
        assert_eq!(encoded.type_rows(), expected);
    }

    #[test]
    fn rejects_molecule_with_any_foreign_element() {
        let whitelist = AtomWhitelist::new(["C", "N", "O"]).unwrap();
        let result = extract_molecule(&molecule(&["C", "Fe", "O"]), &whitelist).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn acceptance_tracks_whitelist_membership() {
        let whitelist = AtomWhitelist::default();
        let cases: [&[&str]; 4] = [&["C", "Cl", "Br"], &["C", "Se"], &["H", "H"], &["Na"]];
        for symbols in cases {
            let accepted = extract_molecule(&molecule(symbols), &whitelist)
                .unwrap()
                .is_some();
            assert_eq!(
                accepted,
                symbols.iter().all(|s| whitelist.contains(s)),
                "{symbols:?}"
            );
        }
    }

    #[test]
    fn accepted_rows_match_input_atom_count() {
        let whitelist = AtomWhitelist::default();
        let input = molecule(&["C", "C", "O", "N", "S", "F"]);
        let encoded = extract_molecule(&input, &whitelist).unwrap().unwrap();
        assert_eq!(encoded.coord_rows().len(), input.atom_count());
        assert_eq!(encoded.type_rows().len(), input.atom_count());
    }
}
