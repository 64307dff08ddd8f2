//! Common helpers for end-to-end tests.

use std::sync::{Arc, Once};

use serde_json::Value;

use crate::client::Client;
use crate::config::MockConfig;
use crate::registry::Registry;
use crate::storage::FixedTimeSource;
use crate::types::{FieldValue, Fields, Record, fields_from_json};

/// Creation time stamped on every record by `TestBase`.
pub const CREATED_TIME: u64 = 1_700_000_000_000;

static TRACING: Once = Once::new();

/// Install a test-writer subscriber, honouring `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "airtable_mock=debug".into());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// A client on a private registry with a pinned clock and seeded ids.
pub struct TestBase {
    pub client: Client,
}

impl TestBase {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MockConfig::default().with_id_seed(0))
    }

    #[must_use]
    pub fn with_config(config: MockConfig) -> Self {
        init_tracing();
        let registry =
            Registry::with_config(config).with_time_source(FixedTimeSource(CREATED_TIME));
        Self {
            client: Client::with_registry(Arc::new(registry), "base", ""),
        }
    }

    /// Create a record from a JSON object.
    pub fn create(&self, table: &str, value: Value) -> Record {
        self.client.create(table, fields(value)).unwrap()
    }

    /// Create one record per JSON object, in order.
    pub fn create_all(&self, table: &str, values: impl IntoIterator<Item = Value>) -> Vec<Record> {
        values.into_iter().map(|v| self.create(table, v)).collect()
    }
}

/// Build a field mapping from a JSON object.
#[must_use]
pub fn fields(value: Value) -> Fields {
    fields_from_json(value).unwrap()
}

/// The `number` field of each record, as integers.
#[must_use]
pub fn numbers<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<i64> {
    records
        .into_iter()
        .map(|record| match record.field("number") {
            Some(FieldValue::Number(n)) => n.as_i64().unwrap(),
            other => panic!("record {} has no number field: {other:?}", record.id),
        })
        .collect()
}
