use crate::model::encoded::ShapeMismatch;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("atom symbol '{symbol}' is not in the whitelist")]
    UnknownSymbol { symbol: String },

    #[error("atom whitelist lists '{symbol}' more than once")]
    DuplicateSymbol { symbol: String },

    #[error("atom whitelist must contain at least one symbol")]
    EmptyWhitelist,

    #[error(transparent)]
    ShapeMismatch(#[from] ShapeMismatch),

    #[error("reference ligand has no atoms; cannot place a pocket around it")]
    EmptyReference,
}

impl Error {
    pub fn unknown_symbol(symbol: impl Into<String>) -> Self {
        Self::UnknownSymbol {
            symbol: symbol.into(),
        }
    }

    pub fn duplicate_symbol(symbol: impl Into<String>) -> Self {
        Self::DuplicateSymbol {
            symbol: symbol.into(),
        }
    }
}
