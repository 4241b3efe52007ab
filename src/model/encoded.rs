//! Canonical extraction output: an `N × 3` coordinate matrix paired row-for-row with an
//! `N × K` one-hot atom type matrix, `K` being the whitelist length.

use super::types::Point;
use nalgebra::DMatrix;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use thiserror::Error;

/// Raised when coordinate and type matrices disagree on row count or shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("encoded structure shape mismatch: coordinates {coord_rows}x{coord_cols}, types {type_rows} rows")]
pub struct ShapeMismatch {
    pub coord_rows: usize,
    pub coord_cols: usize,
    pub type_rows: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EncodedStructure {
    coords: DMatrix<f64>,
    atom_types: DMatrix<f64>,
}

impl EncodedStructure {
    /// Pairs a coordinate matrix with a one-hot matrix.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeMismatch`] when `coords` is not three columns wide or when the two
    /// matrices have different row counts.
    pub fn try_new(coords: DMatrix<f64>, atom_types: DMatrix<f64>) -> Result<Self, ShapeMismatch> {
        if coords.ncols() != 3 || coords.nrows() != atom_types.nrows() {
            return Err(ShapeMismatch {
                coord_rows: coords.nrows(),
                coord_cols: coords.ncols(),
                type_rows: atom_types.nrows(),
            });
        }
        Ok(Self { coords, atom_types })
    }

    /// Builds the matrices from positions and whitelist indices of equal length.
    ///
    /// # Arguments
    ///
    /// * `positions` - One point per output row.
    /// * `type_indices` - Whitelist index of each row; must be `< width`.
    /// * `width` - Whitelist length, i.e. one-hot dimensionality.
    pub(crate) fn from_indices(
        positions: &[Point],
        type_indices: &[usize],
        width: usize,
    ) -> Result<Self, ShapeMismatch> {
        let coords = DMatrix::from_row_iterator(
            positions.len(),
            3,
            positions.iter().flat_map(|p| [p.x, p.y, p.z]),
        );
        let mut atom_types = DMatrix::zeros(type_indices.len(), width);
        for (row, &col) in type_indices.iter().enumerate() {
            atom_types[(row, col)] = 1.0;
        }
        Self::try_new(coords, atom_types)
    }

    pub fn coords(&self) -> &DMatrix<f64> {
        &self.coords
    }

    pub fn atom_types(&self) -> &DMatrix<f64> {
        &self.atom_types
    }

    pub fn atom_count(&self) -> usize {
        self.coords.nrows()
    }

    pub fn type_width(&self) -> usize {
        self.atom_types.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.atom_count() == 0
    }

    pub fn position(&self, row: usize) -> Point {
        Point::new(
            self.coords[(row, 0)],
            self.coords[(row, 1)],
            self.coords[(row, 2)],
        )
    }

    /// Column of the hot entry in each row, `None` for an all-zero row.
    pub fn type_indices(&self) -> Vec<Option<usize>> {
        self.atom_types
            .row_iter()
            .map(|row| row.iter().position(|&v| v == 1.0))
            .collect()
    }

    /// Mean position of all rows, `None` when empty.
    pub fn centroid(&self) -> Option<Point> {
        let n = self.atom_count();
        if n == 0 {
            return None;
        }
        let mut sum = nalgebra::Vector3::zeros();
        for row in 0..n {
            sum += self.position(row).coords;
        }
        Some(Point::from(sum / n as f64))
    }

    /// Keeps the given rows, in the given order, from both matrices.
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        Self {
            coords: self.coords.select_rows(rows.iter()),
            atom_types: self.atom_types.select_rows(rows.iter()),
        }
    }

    pub fn coord_rows(&self) -> Vec<[f64; 3]> {
        (0..self.atom_count())
            .map(|row| {
                [
                    self.coords[(row, 0)],
                    self.coords[(row, 1)],
                    self.coords[(row, 2)],
                ]
            })
            .collect()
    }

    pub fn type_rows(&self) -> Vec<Vec<f64>> {
        self.atom_types
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect()
    }
}

impl Serialize for EncodedStructure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("EncodedStructure", 2)?;
        state.serialize_field("coord", &self.coord_rows())?;
        state.serialize_field("atom_type", &self.type_rows())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EncodedStructure {
        EncodedStructure::from_indices(
            &[
                Point::new(0.0, 0.0, 0.0),
                Point::new(2.0, 0.0, 0.0),
                Point::new(4.0, 3.0, 0.0),
            ],
            &[0, 2, 1],
            3,
        )
        .unwrap()
    }

    #[test]
    fn from_indices_builds_matching_shapes() {
        let encoded = sample();

        assert_eq!(encoded.coords().shape(), (3, 3));
        assert_eq!(encoded.atom_types().shape(), (3, 3));
        assert_eq!(encoded.type_indices(), vec![Some(0), Some(2), Some(1)]);
        assert_eq!(encoded.coord_rows()[2], [4.0, 3.0, 0.0]);
    }

    #[test]
    fn try_new_rejects_row_mismatch() {
        let coords = DMatrix::zeros(2, 3);
        let types = DMatrix::zeros(1, 4);

        let err = EncodedStructure::try_new(coords, types).unwrap_err();
        assert_eq!(err.coord_rows, 2);
        assert_eq!(err.type_rows, 1);
    }

    #[test]
    fn try_new_rejects_non_cartesian_coordinates() {
        let coords = DMatrix::zeros(2, 2);
        let types = DMatrix::zeros(2, 4);

        assert!(EncodedStructure::try_new(coords, types).is_err());
    }

    #[test]
    fn select_rows_filters_both_matrices() {
        let encoded = sample().select_rows(&[2, 0]);

        assert_eq!(encoded.atom_count(), 2);
        assert_eq!(encoded.type_indices(), vec![Some(1), Some(0)]);
        assert_eq!(encoded.position(0), Point::new(4.0, 3.0, 0.0));
    }

    #[test]
    fn centroid_averages_rows() {
        let centroid = sample().centroid().unwrap();
        assert!((centroid.x - 2.0).abs() < 1e-12);
        assert!((centroid.y - 1.0).abs() < 1e-12);

        let empty = EncodedStructure::from_indices(&[], &[], 3).unwrap();
        assert!(empty.centroid().is_none());
        assert!(empty.is_empty());
        assert_eq!(empty.type_width(), 3);
    }

    #[test]
    fn serializes_as_nested_rows() {
        let encoded = EncodedStructure::from_indices(&[Point::new(1.0, 2.0, 3.0)], &[1], 2)
            .unwrap();

        let json = serde_json::to_value(&encoded).unwrap();
        assert_eq!(json["coord"], serde_json::json!([[1.0, 2.0, 3.0]]));
        assert_eq!(json["atom_type"], serde_json::json!([[0.0, 1.0]]));
    }
}
