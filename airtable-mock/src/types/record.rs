//! Record types as returned to callers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::field_value::FieldValue;
use super::ids::RecordId;

/// Mapping from field name to value.
pub type Fields = BTreeMap<String, FieldValue>;

/// Build a field mapping from a JSON object.
///
/// # Errors
///
/// Returns an error if `value` is not a JSON object.
pub fn fields_from_json(value: serde_json::Value) -> serde_json::Result<Fields> {
    serde_json::from_value(value)
}

/// A stored record.
///
/// `id` and `created_time` are fixed at creation; only `fields` ever change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    pub fields: Fields,
    /// Creation time in milliseconds since the Unix epoch.
    pub created_time: u64,
}

impl Record {
    /// Look up a field value.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}

/// Confirmation returned by a delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedRecord {
    pub id: RecordId,
    pub deleted: bool,
}

impl DeletedRecord {
    #[must_use]
    pub const fn new(id: RecordId) -> Self {
        Self { id, deleted: true }
    }
}
