use crate::io::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Whether `.gz` inputs can be decompressed by this build.
pub const fn gzip_supported() -> bool {
    cfg!(feature = "gzip")
}

pub(crate) fn is_gzip(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Opens a file for buffered line reading, decompressing `.gz` files on the fly.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be opened and [`Error::Unsupported`] for a
/// gzip input when the `gzip` feature is disabled.
pub fn open(path: &Path) -> Result<Box<dyn BufRead>, Error> {
    let file = File::open(path).map_err(|e| Error::from_io(e, Some(path.to_path_buf())))?;

    if is_gzip(path) {
        return open_gzip(file, path);
    }

    Ok(Box::new(BufReader::new(file)))
}

#[cfg(feature = "gzip")]
fn open_gzip(file: File, _path: &Path) -> Result<Box<dyn BufRead>, Error> {
    let decoder = flate2::read::MultiGzDecoder::new(file);
    Ok(Box::new(BufReader::new(decoder)))
}

#[cfg(not(feature = "gzip"))]
fn open_gzip(_file: File, path: &Path) -> Result<Box<dyn BufRead>, Error> {
    Err(Error::unsupported(
        "gzip",
        Some(path.to_path_buf()),
        "gzip support was not compiled in (enable the `gzip` feature)",
    ))
}
