//! Lazy page-by-page iteration over a listing.

use std::sync::Arc;

use super::engine::list_records;
use super::types::ListQuery;
use crate::error::Result;
use crate::registry::Registry;
use crate::types::Record;

/// Pages of a listing, fetched one at a time as the iterator advances.
///
/// Each page reflects the table at the moment it is fetched. Iteration stops
/// after the last page, or after yielding an error.
#[derive(Debug)]
pub struct Pages {
    registry: Arc<Registry>,
    base: String,
    table: String,
    query: ListQuery,
    done: bool,
}

impl Pages {
    /// Start iterating. `query.offset` is the starting point, usually `None`.
    #[must_use]
    pub fn new(
        registry: Arc<Registry>,
        base: impl Into<String>,
        table: impl Into<String>,
        query: ListQuery,
    ) -> Self {
        Self {
            registry,
            base: base.into(),
            table: table.into(),
            query,
            done: false,
        }
    }

    /// Flatten the pages into individual records.
    pub fn records(self) -> impl Iterator<Item = Result<Record>> {
        self.flat_map(|page| match page {
            Ok(records) => records.into_iter().map(Ok).collect::<Vec<_>>(),
            Err(e) => vec![Err(e)],
        })
    }
}

impl Iterator for Pages {
    type Item = Result<Vec<Record>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let response = match list_records(&self.registry, &self.base, &self.table, &self.query) {
            Ok(response) => response,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };

        self.query.offset = response.offset;
        self.done = response.offset.is_none();
        if response.records.is_empty() {
            self.done = true;
            return None;
        }
        Some(Ok(response.records))
    }
}
