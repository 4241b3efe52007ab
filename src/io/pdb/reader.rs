use crate::io::error::Error;
use crate::model::{
    table::{AtomRecord, ProteinTable},
    types::{Point, normalize_symbol},
};
use smol_str::SmolStr;
use std::io::BufRead;

const FORMAT: &str = "PDB";

/// Reads `ATOM` and `HETATM` records into a [`ProteinTable`].
///
/// Records keep file order within each collection. Alternate locations are all retained and
/// no residue grouping is performed; the table mirrors the file row for row.
pub fn read<R: BufRead>(reader: R) -> Result<ProteinTable, Error> {
    let mut table = ProteinTable::new();

    let mut line_num = 0;

    for line in reader.lines() {
        line_num += 1;
        let line = line.map_err(|e| Error::from_io(e, None))?;

        let is_atom = line.starts_with("ATOM  ");
        let is_hetatm = line.starts_with("HETATM");

        if is_atom {
            table.atoms.push(parse_atom_record(&line, line_num)?);
        } else if is_hetatm {
            table.hetero.push(parse_atom_record(&line, line_num)?);
        } else if line.starts_with("ENDMDL") {
            break;
        }
    }

    Ok(table)
}

fn column(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    line.get(start..end).unwrap_or("")
}

fn column_char(line: &str, idx: usize) -> Option<char> {
    match line.as_bytes().get(idx) {
        Some(b' ') | None => None,
        Some(&b) => Some(b as char),
    }
}

fn parse_atom_record(line: &str, line_num: usize) -> Result<AtomRecord, Error> {
    if line.len() < 54 {
        return Err(Error::parse(FORMAT, None, line_num, "Atom record too short"));
    }

    let serial_str = column(line, 6, 11);
    let atom_name = column(line, 12, 16).trim();
    let alt_loc = column_char(line, 16);
    let res_name = column(line, 17, 20).trim();
    let chain_id = column(line, 21, 22).trim();
    let res_seq_str = column(line, 22, 26);

    let x_str = column(line, 30, 38);
    let y_str = column(line, 38, 46);
    let z_str = column(line, 46, 54);

    let element_str = column(line, 76, 78).trim();

    if atom_name.is_empty() {
        return Err(Error::parse(FORMAT, None, line_num, "Missing atom name"));
    }

    // Large files overflow the serial column with hybrid-36 or '*****'.
    let serial = serial_str.trim().parse::<i64>().unwrap_or(0);

    let res_seq = res_seq_str
        .trim()
        .parse::<i32>()
        .map_err(|_| Error::parse(FORMAT, None, line_num, "Invalid residue sequence number"))?;

    let x = x_str
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::parse(FORMAT, None, line_num, "Invalid X coordinate"))?;
    let y = y_str
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::parse(FORMAT, None, line_num, "Invalid Y coordinate"))?;
    let z = z_str
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::parse(FORMAT, None, line_num, "Invalid Z coordinate"))?;

    let element = if element_str.is_empty() {
        None
    } else {
        Some(SmolStr::new(normalize_symbol(element_str)))
    };

    Ok(AtomRecord {
        serial,
        atom_name: SmolStr::new(atom_name),
        alt_loc,
        residue_name: SmolStr::new(res_name),
        chain_id: SmolStr::new(chain_id),
        residue_id: res_seq,
        element,
        pos: Point::new(x, y, z),
    })
}
