//! Error taxonomy for the mock.
//!
//! Every failure is returned synchronously to the caller. Nothing is retried
//! and nothing degrades into an empty result: an unknown table in particular
//! is always an error, because hiding it would hide a bug in the code under
//! test.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = MockError> = std::result::Result<T, E>;

/// Errors returned by the mock storage engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MockError {
    /// A read, update or delete targeted a table never created in that base.
    #[error("unknown table '{table}' in base '{base}'")]
    UnknownTable { base: String, table: String },

    /// A read, update or delete targeted a record id absent from its table.
    #[error("record '{record_id}' not found in table '{table}'")]
    NotFound { table: String, record_id: String },

    /// A query referenced a view never defined for the table.
    #[error("unknown view '{view}' for table '{table}'")]
    UnknownView { table: String, view: String },

    /// A filter or view formula failed to parse.
    #[error("formula syntax error: {0}")]
    FormulaSyntax(#[from] FormulaError),

    /// No unused record id could be drawn for the table.
    #[error("could not generate a new random record id for table '{table}'")]
    IdGeneration { table: String },

    /// A continuation offset that this mock never issued.
    #[error("invalid offset '{0}'")]
    InvalidOffset(String),

    /// The registry lock was poisoned by a panicking holder.
    #[error("registry lock poisoned")]
    LockPoisoned,
}

/// A formula that could not be parsed.
///
/// `position` is the byte offset in the formula text where parsing failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message} at position {position}")]
pub struct FormulaError {
    pub message: String,
    pub position: usize,
}

impl FormulaError {
    #[must_use]
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}
