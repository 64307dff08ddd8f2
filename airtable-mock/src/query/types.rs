//! Query parameters and responses for listing a table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MockError;
use crate::types::Record;

/// Continuation token for a paginated listing.
///
/// Wraps the number of matching records consumed so far. Callers should treat
/// it as opaque and hand it back unchanged; it serializes as a string, like
/// the modeled service's tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Offset(usize);

impl Offset {
    #[must_use]
    pub const fn new(position: usize) -> Self {
        Self(position)
    }

    /// Number of matching records to skip.
    #[must_use]
    pub const fn position(self) -> usize {
        self.0
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Offset {
    type Err = MockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse()
            .map(Self)
            .map_err(|_| MockError::InvalidOffset(s.to_owned()))
    }
}

impl From<Offset> for String {
    fn from(offset: Offset) -> Self {
        offset.to_string()
    }
}

impl TryFrom<String> for Offset {
    type Error = MockError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Parameters for listing or iterating a table.
///
/// With no parameters set, a listing returns the table's first page of
/// records in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Formula every returned record must satisfy.
    pub filter_by_formula: Option<String>,
    /// View whose formula every returned record must satisfy.
    pub view: Option<String>,
    /// Page size. `None` or `0` means the configured maximum; larger values
    /// are clamped to it. For `iterate` this is the batch size.
    pub limit: Option<usize>,
    /// Where to resume a previous listing.
    pub offset: Option<Offset>,
}

impl ListQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn filter_by_formula(mut self, formula: impl Into<String>) -> Self {
        self.filter_by_formula = Some(formula.into());
        self
    }

    #[must_use]
    pub fn view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Alias of `limit`, named after the `iterate` parameter.
    #[must_use]
    pub const fn batch_size(self, size: usize) -> Self {
        self.limit(size)
    }

    #[must_use]
    pub const fn offset(mut self, offset: Offset) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Page size after applying the default and the clamp. Never 0, so
    /// following offsets always makes progress.
    #[must_use]
    pub fn page_size(&self, max_page_size: usize) -> usize {
        let max_page_size = max_page_size.max(1);
        match self.limit {
            None | Some(0) => max_page_size,
            Some(limit) => limit.min(max_page_size),
        }
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse {
    pub records: Vec<Record>,
    /// Present when more matching records remain after this page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<Offset>,
}

impl ListResponse {
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
