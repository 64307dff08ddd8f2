//! Client facade mirroring the record service's client API.
//!
//! A `Client` is bound to one base. Every call goes straight to the registry
//! it was built with: writes to the table's record store, reads through the
//! query engine.

use std::sync::Arc;

use crate::error::Result;
use crate::query::{ListQuery, ListResponse, Pages, list_records, validate};
use crate::registry::Registry;
use crate::types::{DeletedRecord, Fields, Record, RecordId};

/// Mock client for one base.
#[derive(Debug, Clone)]
pub struct Client {
    base_id: String,
    api_key: String,
    registry: Arc<Registry>,
}

impl Client {
    /// Create a client on the process-wide registry.
    ///
    /// The API key is kept but never checked.
    #[must_use]
    pub fn new(base_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_registry(Arc::clone(Registry::global()), base_id, api_key)
    }

    /// Create a client on a specific registry.
    #[must_use]
    pub fn with_registry(
        registry: Arc<Registry>,
        base_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            base_id: base_id.into(),
            api_key: api_key.into(),
            registry,
        }
    }

    #[must_use]
    pub fn base_id(&self) -> &str {
        &self.base_id
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    #[must_use]
    pub const fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Create a record, creating the table on first use.
    pub fn create(&self, table: &str, fields: Fields) -> Result<Record> {
        self.registry.create(&self.base_id, table, fields)
    }

    /// Fetch one record by id.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTable` or `NotFound`.
    pub fn get(&self, table: &str, record_id: &RecordId) -> Result<Record> {
        self.registry.get(&self.base_id, table, record_id)
    }

    /// List one page of records.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTable`, `UnknownView` or `FormulaSyntax`.
    pub fn list(&self, table: &str, query: &ListQuery) -> Result<ListResponse> {
        list_records(&self.registry, &self.base_id, table, query)
    }

    /// Iterate over all matching records, one page at a time.
    ///
    /// `query.limit` is the batch size. The table, view and filter are checked
    /// up front; pages are then fetched lazily.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTable`, `UnknownView` or `FormulaSyntax`.
    pub fn iterate(&self, table: &str, query: ListQuery) -> Result<Pages> {
        validate(&self.registry, &self.base_id, table, &query)?;
        Ok(Pages::new(
            Arc::clone(&self.registry),
            self.base_id.as_str(),
            table,
            query,
        ))
    }

    /// Update the named fields of a record, keeping the others.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTable` or `NotFound`.
    pub fn update(&self, table: &str, record_id: &RecordId, fields: Fields) -> Result<Record> {
        self.registry.update(&self.base_id, table, record_id, fields)
    }

    /// Replace all fields of a record.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTable` or `NotFound`.
    pub fn update_all(
        &self,
        table: &str,
        record_id: &RecordId,
        fields: Fields,
    ) -> Result<Record> {
        self.registry
            .replace(&self.base_id, table, record_id, fields)
    }

    /// Delete a record.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTable` or `NotFound`.
    pub fn delete(&self, table: &str, record_id: &RecordId) -> Result<DeletedRecord> {
        self.registry.delete(&self.base_id, table, record_id)
    }

    /// Define or overwrite a named view, creating the table on first use.
    ///
    /// # Errors
    ///
    /// Returns `FormulaSyntax` if the formula does not parse.
    pub fn create_view(&self, table: &str, view: &str, formula: &str) -> Result<()> {
        self.registry
            .define_view(&self.base_id, table, view, formula)
    }
}
