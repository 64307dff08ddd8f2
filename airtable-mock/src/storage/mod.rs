//! In-memory record storage.
//!
//! A `Table` owns its records in creation order together with its named
//! views. Tables are grouped into bases by the `Registry`; nothing here is
//! persisted.

pub mod table;
pub mod time;
pub mod views;

pub use table::{MAX_ID_ATTEMPTS, Table};
pub use time::{FixedTimeSource, SystemTimeSource, TimeSource};
pub use views::ViewRegistry;
