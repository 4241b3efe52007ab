use crate::io::error::Error;
use crate::model::{
    atom::Atom,
    molecule::Molecule,
    types::{Point, normalize_symbol},
};
use std::io::{BufRead, Lines};

const FORMAT: &str = "SDF";

/// Iterator over the records of a multi-molecule SDF stream.
///
/// Each record is parsed independently: a malformed record yields an `Err` for that record
/// and iteration continues with the next `$$$$`-delimited block. An I/O failure ends the
/// iteration after being reported once.
pub struct SdfRecords<R> {
    lines: Lines<R>,
    line_num: usize,
    done: bool,
}

/// Streams every molecule record of an SDF source.
pub fn read_all<R: BufRead>(reader: R) -> SdfRecords<R> {
    SdfRecords {
        lines: reader.lines(),
        line_num: 0,
        done: false,
    }
}

/// Reads the first molecule record, the single-ligand case.
///
/// # Errors
///
/// Returns the record's parse error, or [`Error::InconsistentData`] when the stream holds
/// no records at all.
pub fn read_first<R: BufRead>(reader: R) -> Result<Molecule, Error> {
    read_all(reader).next().unwrap_or_else(|| {
        Err(Error::inconsistent_data(
            FORMAT,
            None,
            "SDF source contains no molecule records",
        ))
    })
}

impl<R: BufRead> Iterator for SdfRecords<R> {
    type Item = Result<Molecule, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut block: Vec<(usize, String)> = Vec::new();
        loop {
            match self.lines.next() {
                None => {
                    self.done = true;
                    break;
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(Error::from_io(e, None)));
                }
                Some(Ok(line)) => {
                    self.line_num += 1;
                    if line.trim() == "$$$$" {
                        break;
                    }
                    block.push((self.line_num, line));
                }
            }
        }

        if block.iter().all(|(_, line)| line.trim().is_empty()) {
            if self.done {
                return None;
            }
            return Some(Err(Error::parse(
                FORMAT,
                None,
                self.line_num,
                "empty SDF record",
            )));
        }

        Some(parse_block(&block))
    }
}

fn parse_block(lines: &[(usize, String)]) -> Result<Molecule, Error> {
    if lines.len() < 4 {
        return Err(Error::parse(
            FORMAT,
            None,
            lines.first().map(|(ln, _)| *ln).unwrap_or(0),
            "SDF record must contain at least a header and counts line",
        ));
    }

    let counts_line_no = lines[3].0;
    let counts_line = &lines[3].1;
    if counts_line.contains("V3000") {
        return Err(Error::unsupported(
            FORMAT,
            None,
            format!("V3000 record at line {counts_line_no} is not supported"),
        ));
    }

    let (atom_count, bond_count) = parse_counts(counts_line, counts_line_no)?;
    let atom_start = 4;
    let bond_start = atom_start + atom_count;

    if lines.len() < bond_start + bond_count {
        return Err(Error::parse(
            FORMAT,
            None,
            lines.last().map(|(ln, _)| *ln).unwrap_or(counts_line_no),
            "SDF record ended before atoms/bonds were fully specified",
        ));
    }

    let name = lines[0].1.trim();
    let atoms = parse_atoms(&lines[atom_start..bond_start])?;

    Ok(Molecule::with_atoms(name, atoms))
}

fn parse_counts(line: &str, line_no: usize) -> Result<(usize, usize), Error> {
    // Fixed-width fields first; some writers run the two counts together ("100101").
    let fixed: Option<(usize, usize)> = line
        .get(0..3)
        .zip(line.get(3..6))
        .and_then(|(a, b)| Some((a.trim().parse().ok()?, b.trim().parse().ok()?)));
    if let Some(counts) = fixed {
        return Ok(counts);
    }

    let tokens: Vec<_> = line.split_whitespace().collect();
    if tokens.len() < 2 {
        return Err(Error::parse(
            FORMAT,
            None,
            line_no,
            "counts line must contain atom and bond counts",
        ));
    }
    let atoms = tokens[0]
        .parse::<usize>()
        .map_err(|_| Error::parse(FORMAT, None, line_no, "invalid atom count"))?;
    let bonds = tokens[1]
        .parse::<usize>()
        .map_err(|_| Error::parse(FORMAT, None, line_no, "invalid bond count"))?;
    Ok((atoms, bonds))
}

fn parse_atoms(lines: &[(usize, String)]) -> Result<Vec<Atom>, Error> {
    let mut atoms = Vec::with_capacity(lines.len());
    for (ln, raw) in lines {
        let padded = format!("{raw:<40}");
        let field = |start: usize, end: usize| padded.get(start..end).unwrap_or("").trim();

        let x = field(0, 10)
            .parse::<f64>()
            .map_err(|_| Error::parse(FORMAT, None, *ln, "invalid x coordinate in atom line"))?;
        let y = field(10, 20)
            .parse::<f64>()
            .map_err(|_| Error::parse(FORMAT, None, *ln, "invalid y coordinate in atom line"))?;
        let z = field(20, 30)
            .parse::<f64>()
            .map_err(|_| Error::parse(FORMAT, None, *ln, "invalid z coordinate in atom line"))?;

        let symbol = normalize_symbol(field(31, 34));
        if symbol.is_empty() {
            return Err(Error::parse(FORMAT, None, *ln, "missing atom symbol"));
        }
        atoms.push(Atom::new(&symbol, &symbol, Point::new(x, y, z)));
    }
    Ok(atoms)
}
