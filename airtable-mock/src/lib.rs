// In-memory stand-in for a remote record-storage service, so that tests of
// code built on the service's client never touch the network.
//
// Life of a request:
// 1. A `Client` call names a table in the client's base
// 2. Writes go to the table's record store through the registry
// 3. Reads go through the query engine:
//     - Resolve the view, if any, to its formula
//     - Parse `filterByFormula`, if any
//     - Keep records passing both, in creation order
//     - Apply offset and page size
//
// System components:
//  - Record store (per-table records and views)
//  - Formula parser and evaluator
//  - Query engine (filtering and pagination)
//  - Process-wide registry, reset with `clear()`

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod client;
pub mod config;
pub mod error;
pub mod formula;
pub mod query;
pub mod registry;
pub mod storage;
pub mod testing;
pub mod types;


pub use client::Client;
pub use config::{ConfigError, MockConfig};
pub use error::{FormulaError, MockError, Result};
pub use formula::{Formula, quote};
pub use query::{ListQuery, ListResponse, Offset, Pages};
pub use registry::Registry;
pub use types::{DeletedRecord, FieldValue, Fields, Record, RecordId, fields_from_json};

/// Drop all bases, tables, views and records from the process-wide registry.
pub fn clear() {
    Registry::global().clear();
}

/// Declare an empty table in the process-wide registry, so that reads of it
/// succeed before any record exists. Does nothing if the table exists.
pub fn create_empty_table(base_id: &str, table: &str) -> Result<()> {
    Registry::global().create_table(base_id, table).map(drop)
}
