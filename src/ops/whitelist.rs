//! Ordered element whitelist and the one-hot atom encoder built on it.

use crate::ops::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Elements kept by default, in encoding order.
pub const DEFAULT_ATOMS: [&str; 11] = ["C", "N", "O", "S", "H", "B", "Br", "Cl", "P", "I", "F"];

/// Ordered, duplicate-free list of element symbols.
///
/// The position of a symbol is its one-hot column, so the order must stay fixed for every
/// structure encoded in one run. Lookups are case-sensitive: readers normalize element
/// symbols before they reach the encoder, while protein atom names are matched verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct AtomWhitelist {
    symbols: Vec<String>,
}

impl AtomWhitelist {
    /// Builds a whitelist from symbols in encoding order.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyWhitelist`] for an empty list and [`Error::DuplicateSymbol`] when a
    /// symbol repeats.
    pub fn new<I, S>(symbols: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list: Vec<String> = Vec::new();
        for symbol in symbols {
            let symbol = symbol.into().trim().to_string();
            if list.contains(&symbol) {
                return Err(Error::duplicate_symbol(symbol));
            }
            list.push(symbol);
        }
        if list.is_empty() {
            return Err(Error::EmptyWhitelist);
        }
        Ok(Self { symbols: list })
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn index_of(&self, symbol: &str) -> Option<usize> {
        self.symbols.iter().position(|s| s == symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.index_of(symbol).is_some()
    }

    /// Encodes one symbol as a vector of `len()` zeros with a single `1.0`.
    ///
    /// This is the single-symbol encoder. The extractors resolve whole structures through
    /// [`index_of`](Self::index_of) and build the matrix in one pass, which yields exactly
    /// these rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSymbol`] if `symbol` is absent.
    pub fn one_hot(&self, symbol: &str) -> Result<Vec<f64>, Error> {
        let index = self
            .index_of(symbol)
            .ok_or_else(|| Error::unknown_symbol(symbol))?;
        let mut vector = vec![0.0; self.len()];
        vector[index] = 1.0;
        Ok(vector)
    }
}

impl Default for AtomWhitelist {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_ATOMS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TryFrom<Vec<String>> for AtomWhitelist {
    type Error = Error;

    fn try_from(symbols: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(symbols)
    }
}

impl From<AtomWhitelist> for Vec<String> {
    fn from(whitelist: AtomWhitelist) -> Self {
        whitelist.symbols
    }
}

impl fmt::Display for AtomWhitelist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.symbols.join(", "))
    }
}
