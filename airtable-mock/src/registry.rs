//! Registry of bases and their tables.
//!
//! One `Registry` holds every base, keyed by base id, and every table of each
//! base, keyed by table name. Clients built with `Client::new` share the
//! process-wide registry returned by `Registry::global`; clients built with
//! `Client::with_registry` use whichever registry they are given, so tests can
//! run against private state.
//!
//! # Thread Safety
//!
//! A single coarse-grained `Mutex` protects the whole base → table → record
//! mapping. Every operation holds it for its full duration, so each call is
//! atomic with respect to other callers.
//!
//! # Invariants
//!
//! - A base exists once any of its tables exists; bases are never removed
//!   except by `clear`
//! - Only `create_table`, `create` and `define_view` bring a table into
//!   existence; every other operation on an absent table fails `UnknownTable`

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};

use crate::config::MockConfig;
use crate::error::{MockError, Result};
use crate::formula::Formula;
use crate::storage::{SystemTimeSource, Table, TimeSource};
use crate::types::{DeletedRecord, Fields, IdGenerator, Record, RecordId};

static GLOBAL: LazyLock<Arc<Registry>> =
    LazyLock::new(|| Arc::new(Registry::with_config(global_config())));

/// Config for the process-wide registry, falling back to defaults when the
/// environment holds invalid values.
fn global_config() -> MockConfig {
    MockConfig::from_env().unwrap_or_else(|e| {
        tracing::warn!("Ignoring mock configuration: {}", e);
        MockConfig::default()
    })
}

/// Tables grouped by base.
pub struct Registry {
    state: Mutex<RegistryState>,
    config: MockConfig,
    clock: Box<dyn TimeSource>,
}

struct RegistryState {
    bases: HashMap<String, HashMap<String, Table>>,
    ids: IdGenerator,
}

impl RegistryState {
    fn new(config: &MockConfig) -> Self {
        Self {
            bases: HashMap::new(),
            ids: IdGenerator::new(config.id_seed()),
        }
    }
}

/// Find a table, creating it (and its base) if absent.
fn table_or_create<'a>(
    bases: &'a mut HashMap<String, HashMap<String, Table>>,
    base: &str,
    table: &str,
) -> &'a mut Table {
    bases
        .entry(base.to_owned())
        .or_default()
        .entry(table.to_owned())
        .or_insert_with(|| {
            tracing::info!("Created table '{}' in base '{}'", table, base);
            Table::new(table)
        })
}

impl Registry {
    /// Create an empty registry with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MockConfig::default())
    }

    /// Create an empty registry.
    #[must_use]
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            state: Mutex::new(RegistryState::new(&config)),
            config,
            clock: Box::new(SystemTimeSource),
        }
    }

    /// Replace the clock used for `createdTime`.
    #[must_use]
    pub fn with_time_source(mut self, clock: impl TimeSource + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// The process-wide registry.
    #[must_use]
    pub fn global() -> &'static Arc<Self> {
        &GLOBAL
    }

    #[must_use]
    pub const fn config(&self) -> &MockConfig {
        &self.config
    }

    fn lock(&self) -> Result<MutexGuard<'_, RegistryState>> {
        self.state.lock().map_err(|_| MockError::LockPoisoned)
    }

    /// Drop every base, table, view and record.
    ///
    /// A seeded id generator restarts its sequence. `clear` also recovers a
    /// registry poisoned by a panicking caller.
    pub fn clear(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        *state = RegistryState::new(&self.config);
        drop(state);
        self.state.clear_poison();
        tracing::info!("Cleared all bases");
    }

    /// Declare a table without records. Does nothing if it already exists.
    ///
    /// Returns whether the table was created by this call.
    pub fn create_table(&self, base: &str, table: &str) -> Result<bool> {
        let mut state = self.lock()?;
        let exists = state
            .bases
            .get(base)
            .is_some_and(|tables| tables.contains_key(table));
        if exists {
            tracing::debug!("Table '{}' in base '{}' already exists", table, base);
        } else {
            table_or_create(&mut state.bases, base, table);
        }
        Ok(!exists)
    }

    /// Whether the table exists.
    pub fn has_table(&self, base: &str, table: &str) -> Result<bool> {
        let state = self.lock()?;
        Ok(state
            .bases
            .get(base)
            .is_some_and(|tables| tables.contains_key(table)))
    }

    /// Run `f` against an existing table.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTable` if the table was never created, or any error
    /// returned by `f`.
    pub fn read_table<T>(
        &self,
        base: &str,
        table: &str,
        f: impl FnOnce(&Table) -> Result<T>,
    ) -> Result<T> {
        let state = self.lock()?;
        let found = state
            .bases
            .get(base)
            .and_then(|tables| tables.get(table))
            .ok_or_else(|| unknown_table(base, table))?;
        f(found)
    }

    /// Run `f` against an existing table, mutably.
    ///
    /// # Errors
    ///
    /// Returns `UnknownTable` if the table was never created, or any error
    /// returned by `f`.
    pub fn write_table<T>(
        &self,
        base: &str,
        table: &str,
        f: impl FnOnce(&mut Table) -> Result<T>,
    ) -> Result<T> {
        let mut state = self.lock()?;
        let found = state
            .bases
            .get_mut(base)
            .and_then(|tables| tables.get_mut(table))
            .ok_or_else(|| unknown_table(base, table))?;
        f(found)
    }

    /// Append a record, creating the table if needed.
    pub fn create(&self, base: &str, table: &str, fields: Fields) -> Result<Record> {
        let created_time = self.clock.now_ms();
        let mut state = self.lock()?;
        let RegistryState { bases, ids } = &mut *state;
        let target = table_or_create(bases, base, table);
        let record = target.insert(fields, created_time, || ids.next_id())?;
        tracing::debug!("Created record '{}' in table '{}'", record.id, table);
        Ok(record)
    }

    /// Fetch one record.
    pub fn get(&self, base: &str, table: &str, id: &RecordId) -> Result<Record> {
        self.read_table(base, table, |t| t.get(id).cloned())
    }

    /// Overwrite the named fields of a record.
    pub fn update(&self, base: &str, table: &str, id: &RecordId, fields: Fields) -> Result<Record> {
        let record = self.write_table(base, table, |t| t.update(id, fields))?;
        tracing::debug!("Updated record '{}' in table '{}'", id, table);
        Ok(record)
    }

    /// Replace all fields of a record.
    pub fn replace(
        &self,
        base: &str,
        table: &str,
        id: &RecordId,
        fields: Fields,
    ) -> Result<Record> {
        let record = self.write_table(base, table, |t| t.replace(id, fields))?;
        tracing::debug!("Replaced record '{}' in table '{}'", id, table);
        Ok(record)
    }

    /// Delete a record.
    pub fn delete(&self, base: &str, table: &str, id: &RecordId) -> Result<DeletedRecord> {
        let deleted = self.write_table(base, table, |t| t.remove(id))?;
        tracing::debug!("Deleted record '{}' from table '{}'", id, table);
        Ok(deleted)
    }

    /// Store or overwrite a view, creating the table if needed.
    ///
    /// # Errors
    ///
    /// Returns `FormulaSyntax` if the formula does not parse. Nothing is
    /// created in that case.
    pub fn define_view(&self, base: &str, table: &str, name: &str, formula: &str) -> Result<()> {
        let parsed = Formula::parse(formula)?;
        let mut state = self.lock()?;
        let previous = table_or_create(&mut state.bases, base, table)
            .views_mut()
            .insert(name, parsed);
        drop(state);
        if previous.is_some() {
            tracing::debug!("Redefined view '{}' on table '{}'", name, table);
        } else {
            tracing::debug!("Defined view '{}' on table '{}'", name, table);
        }
        Ok(())
    }

    /// Look up a view's formula.
    pub fn resolve_view(&self, base: &str, table: &str, name: &str) -> Result<Formula> {
        self.read_table(base, table, |t| t.views().resolve(table, name).cloned())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("config", &self.config)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

fn unknown_table(base: &str, table: &str) -> MockError {
    tracing::warn!(
        "Table '{}' was never created in base '{}'; use create_empty_table to declare an empty table",
        table,
        base
    );
    MockError::UnknownTable {
        base: base.to_owned(),
        table: table.to_owned(),
    }
}
