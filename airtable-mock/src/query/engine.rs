//! Query engine implementation.
//!
//! The `QueryEngine` lists a table's records:
//! 1. Candidates are all records in creation order
//! 2. A view's formula, when named, must hold
//! 3. A `filterByFormula`, when given, must also hold
//! 4. `offset` skips matching records, then the page size caps the result
//!
//! A page that stops before the last matching record carries an `Offset` to
//! resume from.

use std::borrow::Cow;

use super::types::{ListQuery, ListResponse, Offset};
use crate::error::Result;
use crate::formula::Formula;
use crate::registry::Registry;
use crate::storage::Table;

/// The query engine evaluates listings against one table.
pub struct QueryEngine<'a> {
    table: &'a Table,
    max_page_size: usize,
}

impl<'a> QueryEngine<'a> {
    /// Create a query engine over a table.
    #[must_use]
    pub const fn new(table: &'a Table, max_page_size: usize) -> Self {
        Self {
            table,
            max_page_size,
        }
    }

    /// Resolve the view and parse the filter of a query.
    ///
    /// # Errors
    ///
    /// Returns `UnknownView` or `FormulaSyntax`.
    pub fn predicates(&self, query: &ListQuery) -> Result<Vec<Cow<'a, Formula>>> {
        let mut predicates = Vec::with_capacity(2);
        if let Some(view) = query.view.as_deref() {
            let formula = self.table.views().resolve(self.table.name(), view)?;
            predicates.push(Cow::Borrowed(formula));
        }
        // A blank filter means no filter, as when the parameter is omitted.
        if let Some(filter) = query
            .filter_by_formula
            .as_deref()
            .filter(|f| !f.trim().is_empty())
        {
            predicates.push(Cow::Owned(Formula::parse(filter)?));
        }
        Ok(predicates)
    }

    /// Execute a listing and return one page.
    pub fn list(&self, query: &ListQuery) -> Result<ListResponse> {
        let predicates = self.predicates(query)?;
        let skip = query.offset.map_or(0, Offset::position);
        let page_size = query.page_size(self.max_page_size);

        let mut matching = self
            .table
            .records()
            .filter(|record| predicates.iter().all(|p| p.matches(&record.fields)))
            .skip(skip);

        let records: Vec<_> = matching.by_ref().take(page_size).cloned().collect();
        let offset = matching
            .next()
            .is_some()
            .then(|| Offset::new(skip + records.len()));

        tracing::debug!(
            "Listed {} record(s) from table '{}' (skip {}, page size {}, more: {})",
            records.len(),
            self.table.name(),
            skip,
            page_size,
            offset.is_some()
        );

        Ok(ListResponse { records, offset })
    }
}

/// List a table held by a registry.
///
/// # Errors
///
/// Returns `UnknownTable`, `UnknownView` or `FormulaSyntax`.
pub fn list_records(
    registry: &Registry,
    base: &str,
    table: &str,
    query: &ListQuery,
) -> Result<ListResponse> {
    let max_page_size = registry.config().max_page_size();
    registry.read_table(base, table, |t| QueryEngine::new(t, max_page_size).list(query))
}

/// Check that a query can run: the table exists, the view resolves and the
/// filter parses.
///
/// # Errors
///
/// Returns `UnknownTable`, `UnknownView` or `FormulaSyntax`.
pub fn validate(registry: &Registry, base: &str, table: &str, query: &ListQuery) -> Result<()> {
    let max_page_size = registry.config().max_page_size();
    registry.read_table(base, table, |t| {
        QueryEngine::new(t, max_page_size).predicates(query).map(drop)
    })
}
