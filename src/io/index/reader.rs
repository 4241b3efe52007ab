use crate::io::error::Error;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const FORMAT: &str = "index";

/// Serialization of a pair index listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexFormat {
    /// Python pickle of a list of tuples.
    Pickle,
    /// JSON array of arrays with the same shape.
    Json,
}

impl IndexFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "pkl" | "pickle" => Some(Self::Pickle),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Whether this build can decode the format.
    pub const fn is_supported(self) -> bool {
        match self {
            Self::Pickle => cfg!(feature = "pickle"),
            Self::Json => true,
        }
    }
}

/// One `(pocket, ligand, protein, rmsd)` row of a pair index.
///
/// Paths are relative to the dataset's structure directory; any of them may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    pub pocket: Option<String>,
    pub ligand: Option<String>,
    pub protein: Option<String>,
    pub rmsd: Option<f64>,
}

impl IndexEntry {
    /// The `(pocket, ligand)` pair when both are present.
    pub fn pair(&self) -> Option<(&str, &str)> {
        Some((self.pocket.as_deref()?, self.ligand.as_deref()?))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Number(f64),
}

/// Reads a pair index, choosing the decoder from the file extension.
///
/// # Errors
///
/// [`Error::Unsupported`] for unknown extensions or a format not compiled in,
/// [`Error::Io`] when the file cannot be opened, and [`Error::Decode`] for malformed rows.
pub fn read_path(path: &Path) -> Result<Vec<IndexEntry>, Error> {
    let format = IndexFormat::from_path(path).ok_or_else(|| {
        Error::unsupported(
            FORMAT,
            Some(path.to_path_buf()),
            "expected a .pkl or .json index",
        )
    })?;

    let file = File::open(path).map_err(|e| Error::from_io(e, Some(path.to_path_buf())))?;
    read(BufReader::new(file), format).map_err(|e| e.with_path(path))
}

/// Reads a pair index from a stream in the given format.
pub fn read<R: Read>(reader: R, format: IndexFormat) -> Result<Vec<IndexEntry>, Error> {
    let rows: Vec<Vec<Option<RawValue>>> = match format {
        IndexFormat::Json => serde_json::from_reader(reader)
            .map_err(|e| Error::decode(FORMAT, None, e.to_string()))?,
        IndexFormat::Pickle => decode_pickle(reader)?,
    };

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| convert_row(i, row))
        .collect()
}

#[cfg(feature = "pickle")]
fn decode_pickle<R: Read>(reader: R) -> Result<Vec<Vec<Option<RawValue>>>, Error> {
    let options = serde_pickle::DeOptions::new().replace_unresolved_globals();
    serde_pickle::from_reader(reader, options).map_err(|e| Error::decode(FORMAT, None, e.to_string()))
}

#[cfg(not(feature = "pickle"))]
fn decode_pickle<R: Read>(_reader: R) -> Result<Vec<Vec<Option<RawValue>>>, Error> {
    Err(Error::unsupported(
        FORMAT,
        None,
        "pickle support was not compiled in (enable the `pickle` feature)",
    ))
}

fn convert_row(index: usize, row: Vec<Option<RawValue>>) -> Result<IndexEntry, Error> {
    if row.len() < 2 {
        return Err(Error::decode(
            FORMAT,
            None,
            format!("row {index} has {} fields, expected at least pocket and ligand", row.len()),
        ));
    }

    let mut fields = row.into_iter();
    let mut path_field = |name: &str| -> Result<Option<String>, Error> {
        match fields.next().flatten() {
            None => Ok(None),
            Some(RawValue::Text(text)) => Ok(Some(text)),
            Some(RawValue::Number(n)) => Err(Error::decode(
                FORMAT,
                None,
                format!("row {index}: {name} path must be a string, found {n}"),
            )),
        }
    };

    let pocket = path_field("pocket")?;
    let ligand = path_field("ligand")?;
    let protein = path_field("protein").unwrap_or(None);

    let rmsd = match fields.next().flatten() {
        Some(RawValue::Number(n)) => Some(n),
        Some(RawValue::Text(text)) => text.trim().parse::<f64>().ok(),
        None => None,
    };

    Ok(IndexEntry {
        pocket,
        ligand,
        protein,
        rmsd,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_json_rows_with_missing_paths() {
        let json = r#"[
            ["a/pocket.pdb", "a/lig.sdf", "a/rec.pdb", 0.75],
            [null, "b/lig.sdf", "b/rec.pdb", 1.2],
            ["c/pocket.pdb", "c/lig.sdf", null, "2.5"],
            ["d/pocket.pdb", "d/lig.sdf"]
        ]"#;

        let entries = read(Cursor::new(json), IndexFormat::Json).unwrap();

        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].pair(), Some(("a/pocket.pdb", "a/lig.sdf")));
        assert_eq!(entries[0].rmsd, Some(0.75));
        assert_eq!(entries[1].pair(), None);
        assert_eq!(entries[2].protein, None);
        assert_eq!(entries[2].rmsd, Some(2.5));
        assert_eq!(entries[3].rmsd, None);
    }

    #[test]
    fn short_rows_are_decode_errors() {
        let err = read(Cursor::new(r#"[["only-one"]]"#), IndexFormat::Json).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn numeric_paths_are_decode_errors() {
        let err = read(Cursor::new(r#"[[1.0, "lig.sdf", null, 0.1]]"#), IndexFormat::Json)
            .unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn format_is_chosen_from_extension() {
        assert_eq!(
            IndexFormat::from_path(Path::new("index.pkl")),
            Some(IndexFormat::Pickle)
        );
        assert_eq!(
            IndexFormat::from_path(Path::new("index.JSON")),
            Some(IndexFormat::Json)
        );
        assert_eq!(IndexFormat::from_path(Path::new("index.csv")), None);
        assert!(IndexFormat::Json.is_supported());
    }

    #[cfg(feature = "pickle")]
    #[test]
    fn reads_pickled_tuples() {
        use serde_pickle::{SerOptions, Value};

        let rows = Value::List(vec![
            Value::Tuple(vec![
                Value::String("x/pocket10.pdb".into()),
                Value::String("x/lig.sdf".into()),
                Value::String("x/rec.pdb".into()),
                Value::F64(0.5),
            ]),
            Value::Tuple(vec![
                Value::None,
                Value::String("y/lig.sdf".into()),
                Value::None,
                Value::F64(1.5),
            ]),
        ]);
        let bytes = serde_pickle::value_to_vec(&rows, SerOptions::new()).unwrap();

        let entries = read(Cursor::new(bytes), IndexFormat::Pickle).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].pair(), Some(("x/pocket10.pdb", "x/lig.sdf")));
        assert_eq!(entries[0].rmsd, Some(0.5));
        assert_eq!(entries[1].pocket, None);
    }
}
