//! Named views: per-table stored filter formulas.
//!
//! # Invariants
//!
//! - A view name maps to at most one formula; redefining a view overwrites it
//! - Stored formulas always parse, because they are parsed when defined

use std::collections::HashMap;

use crate::error::{MockError, Result};
use crate::formula::Formula;

/// The views of one table.
#[derive(Debug, Default)]
pub struct ViewRegistry {
    views: HashMap<String, Formula>,
}

impl ViewRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store or overwrite a view.
    ///
    /// Returns the formula previously stored under `name`, if any.
    ///
    /// # Errors
    ///
    /// Returns `FormulaSyntax` if `formula` does not parse; the registry is
    /// left unchanged.
    pub fn define(&mut self, name: &str, formula: &str) -> Result<Option<Formula>> {
        let parsed = Formula::parse(formula)?;
        Ok(self.insert(name, parsed))
    }

    /// Store or overwrite a view with an already parsed formula.
    pub fn insert(&mut self, name: &str, formula: Formula) -> Option<Formula> {
        self.views.insert(name.to_owned(), formula)
    }

    /// Resolve a view name to its formula.
    ///
    /// # Errors
    ///
    /// Returns `UnknownView` if the view was never defined for `table`.
    pub fn resolve(&self, table: &str, name: &str) -> Result<&Formula> {
        self.views.get(name).ok_or_else(|| MockError::UnknownView {
            table: table.to_owned(),
            view: name.to_owned(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}
