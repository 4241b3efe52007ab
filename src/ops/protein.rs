use crate::model::{encoded::EncodedStructure, table::ProteinTable, types::Point};
use crate::ops::error::Error;
use crate::ops::whitelist::AtomWhitelist;
use serde::{Deserialize, Serialize};

/// How a protein atom name is tested against the whitelist.
///
/// Encoding always uses the first character of the atom name; only the filter differs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AtomNameMatch {
    /// The full atom name must equal a whitelist symbol (`N` passes, `CA` does not).
    #[default]
    ExactName,
    /// The first character of the atom name must be whitelisted (`CA` passes as `C`).
    LeadingElement,
}

/// Record-level switches applied before encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProteinFilter {
    /// Drop records whose atom name starts with `H`.
    pub remove_hydrogens: bool,
    /// Append heteroatom records after the standard atoms.
    pub keep_hetero: bool,
    pub atom_name_match: AtomNameMatch,
}

impl Default for ProteinFilter {
    fn default() -> Self {
        Self {
            remove_hydrogens: true,
            keep_hetero: false,
            atom_name_match: AtomNameMatch::default(),
        }
    }
}

/// Encodes a protein table under the permissive per-atom policy.
///
/// Records are taken in file order (heteroatoms last when kept), hydrogens are dropped if
/// requested, and every record whose atom name fails the whitelist test is skipped. One mask
/// selects both coordinates and types, so the two matrices always share a row count.
///
/// # Arguments
///
/// * `table` - Parsed protein or pocket records.
/// * `filter` - Hydrogen, heteroatom and name-matching policy.
/// * `whitelist` - Element order defining the one-hot columns.
///
/// # Errors
///
/// Returns [`Error::UnknownSymbol`] when an atom name passes the exact-name test but its
/// first character is not itself whitelisted (for example `Cl` with `C` absent).
pub fn extract_protein(
    table: &ProteinTable,
    filter: &ProteinFilter,
    whitelist: &AtomWhitelist,
) -> Result<EncodedStructure, Error> {
    let mut positions: Vec<Point> = Vec::new();
    let mut indices: Vec<usize> = Vec::new();

    for record in table.iter_records(filter.keep_hetero) {
        if filter.remove_hydrogens && record.is_hydrogen_named() {
            continue;
        }

        let Some(symbol) = record.leading_symbol() else {
            continue;
        };

        let passes = match filter.atom_name_match {
            AtomNameMatch::ExactName => whitelist.contains(&record.atom_name),
            AtomNameMatch::LeadingElement => whitelist.contains(symbol),
        };
        if !passes {
            continue;
        }

        let index = whitelist
            .index_of(symbol)
            .ok_or_else(|| Error::unknown_symbol(symbol))?;
        positions.push(record.pos);
        indices.push(index);
    }

    Ok(EncodedStructure::from_indices(
        &positions,
        &indices,
        whitelist.len(),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::table::AtomRecord;

    fn table(names: &[&str], hetero: &[&str]) -> ProteinTable {
        let record = |i: usize, name: &&str| AtomRecord::new(i as i64, name, Point::new(i as f64, 0.0, 0.0));
        ProteinTable {
            atoms: names.iter().enumerate().map(|(i, n)| record(i, n)).collect(),
            hetero: hetero
                .iter()
                .enumerate()
                .map(|(i, n)| record(100 + i, n))
                .collect(),
        }
    }

    fn filter(atom_name_match: AtomNameMatch) -> ProteinFilter {
        ProteinFilter {
            atom_name_match,
            ..ProteinFilter::default()
        }
    }

    #[test]
    fn exact_name_keeps_only_bare_element_names() {
        let whitelist = AtomWhitelist::new(["C", "N"]).unwrap();
        let encoded = extract_protein(
            &table(&["CA", "HB1", "N"], &[]),
            &filter(AtomNameMatch::ExactName),
            &whitelist,
        )
        .unwrap();

        assert_eq!(encoded.atom_count(), 1);
        assert_eq!(encoded.type_indices(), vec![Some(1)]);
        assert_eq!(encoded.position(0), Point::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn leading_element_keeps_backbone_carbon() {
        let whitelist = AtomWhitelist::new(["C", "N"]).unwrap();
        let encoded = extract_protein(
            &table(&["CA", "HB1", "N"], &[]),
            &filter(AtomNameMatch::LeadingElement),
            &whitelist,
        )
        .unwrap();

        assert_eq!(encoded.type_indices(), vec![Some(0), Some(1)]);
        assert_eq!(encoded.position(0), Point::new(0.0, 0.0, 0.0));
        assert_eq!(encoded.position(1), Point::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn hydrogens_never_survive_removal() {
        let whitelist = AtomWhitelist::default();
        let encoded = extract_protein(
            &table(&["H", "HA", "N", "H2", "C"], &[]),
            &filter(AtomNameMatch::LeadingElement),
            &whitelist,
        )
        .unwrap();

        let h = whitelist.index_of("H").unwrap();
        assert!(encoded.type_indices().iter().all(|i| *i != Some(h)));
        assert_eq!(encoded.atom_count(), 2);
    }

    #[test]
    fn hydrogens_are_kept_when_removal_is_off() {
        let whitelist = AtomWhitelist::default();
        let keep = ProteinFilter {
            remove_hydrogens: false,
            ..ProteinFilter::default()
        };
        let encoded = extract_protein(&table(&["H", "N"], &[]), &keep, &whitelist).unwrap();
        assert_eq!(encoded.atom_count(), 2);
    }

    #[test]
    fn hetero_records_follow_standard_atoms_when_kept() {
        let whitelist = AtomWhitelist::default();
        let records = table(&["N", "C"], &["O", "S"]);

        let without = extract_protein(&records, &ProteinFilter::default(), &whitelist).unwrap();
        assert_eq!(without.atom_count(), 2);

        let with_het = ProteinFilter {
            keep_hetero: true,
            ..ProteinFilter::default()
        };
        let encoded = extract_protein(&records, &with_het, &whitelist).unwrap();
        assert_eq!(encoded.atom_count(), 4);
        assert_eq!(encoded.position(2), Point::new(100.0, 0.0, 0.0));
        assert_eq!(encoded.type_indices()[3], whitelist.index_of("S"));
    }

    #[test]
    fn coordinate_and_type_rows_always_agree() {
        let whitelist = AtomWhitelist::new(["C", "N", "O"]).unwrap();
        let names = ["N", "CA", "C", "O", "CB", "OG", "ZN", "HA", "FE", "C"];
        for mode in [AtomNameMatch::ExactName, AtomNameMatch::LeadingElement] {
            let encoded = extract_protein(&table(&names, &["O"]), &filter(mode), &whitelist).unwrap();
            assert_eq!(encoded.coords().nrows(), encoded.atom_types().nrows());
        }
    }

    #[test]
    fn exact_name_without_leading_symbol_is_an_error() {
        let whitelist = AtomWhitelist::new(["Cl", "N"]).unwrap();
        let err = extract_protein(
            &table(&["Cl"], &[]),
            &filter(AtomNameMatch::ExactName),
            &whitelist,
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnknownSymbol { symbol } if symbol == "C"));
    }
}
