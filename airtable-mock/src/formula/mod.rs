//! Formula language used by `filterByFormula` and views.
//!
//! Supported syntax:
//! - Field references: `{Field Name}`, or a bare identifier such as `status`
//! - String literals in single or double quotes. An embedded delimiter is
//!   written twice (`'a''b'`) or escaped with a backslash
//! - Integer and decimal literals, optionally negative
//! - Comparisons: `=`, `!=`, `<`, `<=`, `>`, `>=`
//! - Functions: `AND`, `OR`, `XOR`, `NOT`, `TRUE`, `FALSE`, `BLANK`
//!
//! # Example
//!
//! ```ignore
//! let formula = Formula::parse("AND({Status} = 'Done', {Points} > 3)")?;
//! assert!(formula.matches(&record.fields));
//! ```

mod evaluator;
mod lexer;
mod parser;

pub use evaluator::{Value, compare, evaluate};
pub use lexer::CompareOp;
pub use parser::{Expr, Function};

use crate::error::FormulaError;
use crate::types::Fields;

/// A parsed formula, ready to be evaluated against many records.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    source: String,
    root: Expr,
}

impl Formula {
    /// Parse formula text.
    ///
    /// # Errors
    ///
    /// Returns a `FormulaError` pointing at the first offending token.
    pub fn parse(source: &str) -> Result<Self, FormulaError> {
        Ok(Self {
            source: source.to_owned(),
            root: parser::parse(source)?,
        })
    }

    /// The original formula text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub const fn root(&self) -> &Expr {
        &self.root
    }

    /// Evaluate the formula for one record.
    #[must_use]
    pub fn evaluate(&self, fields: &Fields) -> Value {
        evaluate(&self.root, fields)
    }

    /// Whether the record satisfies the formula.
    #[must_use]
    pub fn matches(&self, fields: &Fields) -> bool {
        self.evaluate(fields).is_truthy()
    }
}

/// Render `text` as a formula string literal.
///
/// Double quotes are doubled and backslashes escaped, so parsing the result
/// always yields `text` back.
#[must_use]
pub fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' => quoted.push_str("\"\""),
            '\\' => quoted.push_str("\\\\"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
