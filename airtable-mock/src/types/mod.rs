pub mod field_value;
pub mod ids;
pub mod record;

pub use field_value::FieldValue;
pub use ids::{IdGenerator, RecordId};
pub use record::{DeletedRecord, Fields, Record, fields_from_json};
