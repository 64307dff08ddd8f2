//! Field value types.
//!
//! Provides the `FieldValue` enum stored in record fields. The store treats
//! values opaquely; only the formula evaluator looks inside them, through
//! `FieldValue::to_formula_text`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A record field value.
///
/// Serializes untagged, so a record's fields have the same JSON shape as the
/// modeled service's records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Boolean(bool),
    /// Kept as JSON number so integers round-trip exactly.
    Number(Number),
    String(String),
    /// Multi-select options, linked record ids, attachments.
    List(Vec<FieldValue>),
    /// Structured values such as a single attachment or collaborator.
    Map(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    /// Create a string value.
    #[must_use]
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    /// Create a number value. Integral values are stored as integers; NaN
    /// and infinities have no JSON form and become null.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Guarded by the range check
    pub fn number(n: impl Into<f64>) -> Self {
        let n = n.into();
        if n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER {
            Self::Number(Number::from(n as i64))
        } else {
            Number::from_f64(n).map_or(Self::Null, Self::Number)
        }
    }

    /// The numeric reading of a number value.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Create a boolean value.
    #[must_use]
    pub const fn boolean(b: bool) -> Self {
        Self::Boolean(b)
    }

    /// Render the value the way formulas see it when comparing.
    ///
    /// Null renders empty, lists join their elements with `", "`, maps render
    /// as JSON text.
    #[must_use]
    pub fn to_formula_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Boolean(b) => if *b { "1" } else { "0" }.to_owned(),
            Self::Number(n) => format_json_number(n),
            Self::String(s) => s.clone(),
            Self::List(items) => items
                .iter()
                .map(Self::to_formula_text)
                .collect::<Vec<_>>()
                .join(", "),
            Self::Map(_) => serde_json::to_string(self).unwrap_or_default(),
        }
    }
}

/// Largest magnitude below which every integer is exact in an `f64` (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Format a number without a trailing `.0` when it is integral.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Guarded by the range check
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Format a stored number, printing integers exactly.
fn format_json_number(n: &Number) -> String {
    if n.is_f64() {
        n.as_f64().map_or_else(|| n.to_string(), format_number)
    } else {
        n.to_string()
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_formula_text())
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::number(n)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        Self::Number(Number::from(n))
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl<T: Into<Self>> From<Vec<T>> for FieldValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Boolean(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Map(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}
