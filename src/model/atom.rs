//! Fundamental atom representation comprising name, element symbol, and Cartesian position.
//!
//! Small-molecule readers produce these atoms directly; protein readers keep a richer
//! [`AtomRecord`](super::table::AtomRecord) and only collapse to coordinates during
//! extraction.

use super::types::Point;
use smol_str::SmolStr;
use std::fmt;

/// Labeled atom carrying its element symbol and position.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Atom name as it appears in the source file (e.g., `C1`), or the symbol when the
    /// format carries no names.
    pub name: SmolStr,
    /// Element symbol in `Xx` capitalization (e.g., `Cl`).
    pub element: SmolStr,
    /// Cartesian coordinates measured in ångströms.
    pub pos: Point,
}

impl Atom {
    /// Creates a new atom from a name, element symbol, and position.
    ///
    /// # Arguments
    ///
    /// * `name` - Atom label such as `"C1"`.
    /// * `element` - Element symbol; stored verbatim, callers normalize beforehand.
    /// * `pos` - `Point` describing the Cartesian coordinates in ångströms.
    pub fn new(name: &str, element: &str, pos: Point) -> Self {
        Self {
            name: SmolStr::new(name),
            element: SmolStr::new(element),
            pos,
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Atom {{ name: \"{}\", element: {}, pos: [{:.3}, {:.3}, {:.3}] }}",
            self.name, self.element, self.pos.x, self.pos.y, self.pos.z
        )
    }
}
