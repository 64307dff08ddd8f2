//! A single table: ordered records plus the table's views.
//!
//! # Invariants
//!
//! - Records iterate in creation order
//! - A record id is issued at most once per table, even after the record is
//!   deleted
//! - `id` and `created_time` of a stored record never change

use std::collections::{BTreeMap, HashMap, HashSet};

use super::views::ViewRegistry;
use crate::error::{MockError, Result};
use crate::types::{DeletedRecord, Fields, Record, RecordId};

/// Number of random ids tried before giving up on a create.
pub const MAX_ID_ATTEMPTS: usize = 30;

/// Records and views of one table.
#[derive(Debug)]
pub struct Table {
    name: String,
    /// Records keyed by creation sequence number.
    records: BTreeMap<u64, Record>,
    /// Record id to creation sequence number, for live records.
    index: HashMap<RecordId, u64>,
    /// Every id ever issued by this table, including deleted ones.
    issued: HashSet<RecordId>,
    next_sequence: u64,
    views: ViewRegistry,
}

impl Table {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: BTreeMap::new(),
            index: HashMap::new(),
            issued: HashSet::new(),
            next_sequence: 0,
            views: ViewRegistry::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of live records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Live records in creation order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    #[must_use]
    pub const fn views(&self) -> &ViewRegistry {
        &self.views
    }

    pub const fn views_mut(&mut self) -> &mut ViewRegistry {
        &mut self.views
    }

    /// Append a new record.
    ///
    /// `next_id` is asked for candidate ids until one has never been issued by
    /// this table, at most `MAX_ID_ATTEMPTS` times.
    ///
    /// # Errors
    ///
    /// Returns `IdGeneration` if every candidate was already taken.
    pub fn insert(
        &mut self,
        fields: Fields,
        created_time: u64,
        mut next_id: impl FnMut() -> RecordId,
    ) -> Result<Record> {
        let id = std::iter::repeat_with(&mut next_id)
            .take(MAX_ID_ATTEMPTS)
            .find(|candidate| !self.issued.contains(candidate))
            .ok_or_else(|| MockError::IdGeneration {
                table: self.name.clone(),
            })?;

        let record = Record {
            id: id.clone(),
            fields,
            created_time,
        };
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.issued.insert(id.clone());
        self.index.insert(id, sequence);
        self.records.insert(sequence, record.clone());
        Ok(record)
    }

    /// Look up a record by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no live record has this id.
    pub fn get(&self, id: &RecordId) -> Result<&Record> {
        self.index
            .get(id)
            .and_then(|sequence| self.records.get(sequence))
            .ok_or_else(|| self.not_found(id))
    }

    /// Overwrite the named fields, leaving all others untouched.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no live record has this id.
    pub fn update(&mut self, id: &RecordId, fields: Fields) -> Result<Record> {
        let record = self.get_mut(id)?;
        record.fields.extend(fields);
        Ok(record.clone())
    }

    /// Discard all fields and install `fields` instead.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no live record has this id.
    pub fn replace(&mut self, id: &RecordId, fields: Fields) -> Result<Record> {
        let record = self.get_mut(id)?;
        record.fields = fields;
        Ok(record.clone())
    }

    /// Remove a record. Its id stays reserved.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no live record has this id.
    pub fn remove(&mut self, id: &RecordId) -> Result<DeletedRecord> {
        let sequence = self.index.remove(id).ok_or_else(|| self.not_found(id))?;
        self.records.remove(&sequence);
        Ok(DeletedRecord::new(id.clone()))
    }

    fn get_mut(&mut self, id: &RecordId) -> Result<&mut Record> {
        let sequence = *self.index.get(id).ok_or_else(|| self.not_found(id))?;
        let name = &self.name;
        self.records
            .get_mut(&sequence)
            .ok_or_else(|| MockError::NotFound {
                table: name.clone(),
                record_id: id.to_string(),
            })
    }

    fn not_found(&self, id: &RecordId) -> MockError {
        MockError::NotFound {
            table: self.name.clone(),
            record_id: id.to_string(),
        }
    }
}
