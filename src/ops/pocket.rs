use crate::model::encoded::EncodedStructure;
use crate::ops::error::Error;

/// Restricts an encoded protein to the sphere of `radius` around a ligand's centroid.
///
/// Rows are kept when their distance to the centroid is at most `radius`; the same row set is
/// taken from coordinates and types, in their existing order.
///
/// # Errors
///
/// Returns [`Error::EmptyReference`] when `reference` has no atoms.
pub fn select_pocket(
    protein: &EncodedStructure,
    reference: &EncodedStructure,
    radius: f64,
) -> Result<EncodedStructure, Error> {
    let center = reference.centroid().ok_or(Error::EmptyReference)?;
    let limit = radius * radius;

    let rows: Vec<usize> = (0..protein.atom_count())
        .filter(|&row| nalgebra::distance_squared(&protein.position(row), &center) <= limit)
        .collect();

    Ok(protein.select_rows(&rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::Point;

    fn encoded(points: &[[f64; 3]], types: &[usize]) -> EncodedStructure {
        let positions: Vec<Point> = points.iter().map(|p| Point::new(p[0], p[1], p[2])).collect();
        EncodedStructure::from_indices(&positions, types, 3).unwrap()
    }

    #[test]
    fn keeps_rows_within_radius_of_ligand_centroid() {
        let protein = encoded(
            &[[0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [3.0, 4.0, 0.0], [0.0, 0.0, 5.1]],
            &[0, 1, 2, 0],
        );
        let ligand = encoded(&[[-1.0, 0.0, 0.0], [1.0, 0.0, 0.0]], &[0, 0]);

        let pocket = select_pocket(&protein, &ligand, 5.0).unwrap();

        assert_eq!(pocket.atom_count(), 2);
        assert_eq!(pocket.type_indices(), vec![Some(0), Some(2)]);
        assert_eq!(pocket.position(1), Point::new(3.0, 4.0, 0.0));
        assert_eq!(pocket.coords().nrows(), pocket.atom_types().nrows());
    }

    #[test]
    fn empty_reference_is_an_error() {
        let protein = encoded(&[[0.0, 0.0, 0.0]], &[0]);
        let ligand = encoded(&[], &[]);
        assert!(matches!(
            select_pocket(&protein, &ligand, 15.0),
            Err(Error::EmptyReference)
        ));
    }

    #[test]
    fn pocket_may_be_empty() {
        let protein = encoded(&[[50.0, 0.0, 0.0]], &[1]);
        let ligand = encoded(&[[0.0, 0.0, 0.0]], &[0]);
        let pocket = select_pocket(&protein, &ligand, 15.0).unwrap();
        assert!(pocket.is_empty());
        assert_eq!(pocket.type_width(), 3);
    }
}
