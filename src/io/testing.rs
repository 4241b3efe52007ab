//! Fixture builders shared by reader and dataset tests.

use std::fs;
use std::path::Path;

/// Formats one fixed-column `ATOM`/`HETATM` line.
#[allow(clippy::too_many_arguments)]
pub(crate) fn pdb_line(
    record: &str,
    serial: i64,
    name: &str,
    resname: &str,
    chain: char,
    resseq: i32,
    coords: [f64; 3],
    element: &str,
) -> String {
    // Four-character names start in column 13; shorter ones are padded to column 14.
    let name_field = if name.len() >= 4 {
        name.to_string()
    } else {
        format!(" {name:<3}")
    };
    format!(
        "{:<6}{:>5} {:<4}{:1}{:>3} {:1}{:>4}{:1}   {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
        record,
        serial,
        name_field,
        ' ',
        resname,
        chain,
        resseq,
        ' ',
        coords[0],
        coords[1],
        coords[2],
        1.0,
        0.0,
        element
    )
}

/// A PDB document with one `ATOM` line per `(atom_name, coords)`, residue numbers increasing.
pub(crate) fn pdb_document(atoms: &[(&str, [f64; 3])], hetero: &[(&str, [f64; 3])]) -> String {
    let mut lines = Vec::new();
    let mut serial = 1;
    for (i, (name, coords)) in atoms.iter().enumerate() {
        let element = name.get(..1).unwrap_or("");
        lines.push(pdb_line("ATOM", serial, name, "ALA", 'A', i as i32 + 1, *coords, element));
        serial += 1;
    }
    for (name, coords) in hetero {
        lines.push(pdb_line("HETATM", serial, name, "HOH", 'A', 900, *coords, name));
        serial += 1;
    }
    lines.push("END".to_string());
    lines.join("\n") + "\n"
}

/// One V2000 SDF record terminated by `$$$$`.
pub(crate) fn sdf_record(name: &str, atoms: &[(&str, [f64; 3])]) -> String {
    let mut out = format!("{name}\n  fixture\n\n");
    out.push_str(&format!(
        "{:>3}{:>3}  0  0  0  0  0  0  0  0999 V2000\n",
        atoms.len(),
        0
    ));
    for (symbol, [x, y, z]) in atoms {
        out.push_str(&format!(
            "{x:>10.4}{y:>10.4}{z:>10.4} {symbol:<3} 0  0  0  0  0  0  0  0  0  0  0  0\n"
        ));
    }
    out.push_str("M  END\n$$$$\n");
    out
}

/// A single-molecule MOL2 block; every atom sits in substructure `1 RES1`.
pub(crate) fn mol2_block(name: &str, atoms: &[(&str, &str, [f64; 3])]) -> String {
    let mut out = format!(
        "@<TRIPOS>MOLECULE\n{name}\n {} 0 0 0 0\nSMALL\nNO_CHARGES\n\n@<TRIPOS>ATOM\n",
        atoms.len()
    );
    for (i, (atom_name, atom_type, [x, y, z])) in atoms.iter().enumerate() {
        out.push_str(&format!(
            "{:>7} {:<8} {x:>10.4} {y:>10.4} {z:>10.4} {atom_type:<6} 1 RES1 0.0000\n",
            i + 1,
            atom_name
        ));
    }
    out.push_str("@<TRIPOS>BOND\n");
    out
}

/// Writes `contents` to `root/relative`, creating parent directories.
pub(crate) fn write_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// Gzips `contents` into `root/relative`.
#[cfg(feature = "gzip")]
pub(crate) fn write_gzip(root: &Path, relative: &str, contents: &str) {
    use std::io::Write;

    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let file = fs::File::create(path).unwrap();
    let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
    encoder.write_all(contents.as_bytes()).unwrap();
    encoder.finish().unwrap();
}
