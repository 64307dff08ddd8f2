//! Query engine for listing tables.
//!
//! This module composes the record store with views and formulas:
//! - Filtering by a named view and/or an ad-hoc `filterByFormula`
//! - Offset/limit pagination with continuation offsets
//! - Lazy page iteration
//!
//! # Example
//!
//! ```ignore
//! let query = ListQuery::new()
//!     .view("Active")
//!     .filter_by_formula("{Points} > 3")
//!     .limit(10);
//! let page = list_records(&registry, "appBase", "Tasks", &query)?;
//! if let Some(offset) = page.offset {
//!     let next = list_records(&registry, "appBase", "Tasks", &query.clone().offset(offset))?;
//! }
//! ```

pub mod engine;
pub mod pages;
pub mod types;

pub use engine::{QueryEngine, list_records, validate};
pub use pages::Pages;
pub use types::{ListQuery, ListResponse, Offset};
