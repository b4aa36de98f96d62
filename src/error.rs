//! Failure taxonomy for loading and transforming team records.

use rusqlite::types::Type;
use std::path::PathBuf;
use std::str::Utf8Error;
use thiserror::Error;

use crate::record::Identifier;

#[derive(Debug, Error)]
pub enum RatioError {
    #[error("failed to open database {path}: {source}")]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to read table {table}: {source}")]
    Query {
        table: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("table {table} has {found} column(s), need at least 3")]
    TooFewColumns { table: String, found: usize },

    #[error("row {row} ({identifier}): division by zero, wins + losses is 0")]
    DivisionByZero { row: usize, identifier: Identifier },

    #[error("row {row} column {column}: expected a number, found {found}")]
    NonNumeric {
        row: usize,
        column: usize,
        found: Type,
    },

    #[error("row {row} column {column}: text is not valid UTF-8: {source}")]
    InvalidText {
        row: usize,
        column: usize,
        #[source]
        source: Utf8Error,
    },
}

impl RatioError {
    /// Stable category name for the failure.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Connection { .. } => "ConnectionError",
            Self::Query { .. } | Self::TooFewColumns { .. } => "QueryError",
            Self::DivisionByZero { .. } => "ArithmeticError",
            Self::NonNumeric { .. } | Self::InvalidText { .. } => "TypeError",
        }
    }
}

pub type Result<T, E = RatioError> = std::result::Result<T, E>;
