//! Typed value representation

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The one date form the catalog accepts and renders.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// A stored attribute value, occupying exactly one typed slot.
///
/// The variant is fixed by the owning attribute's declared data type at
/// encode time and never reinterpreted afterwards. Enum values occupy
/// the text slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "slot", content = "value", rename_all = "lowercase")]
pub enum TypedValue {
    /// UTF-8 text, also the slot for enum values
    Text(String),
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit floating point, kept finite by the codec
    Decimal(f64),
    /// Boolean
    Boolean(bool),
    /// Calendar date
    Date(NaiveDate),
}

impl TypedValue {
    /// The name of the slot this value occupies.
    pub fn slot_name(&self) -> &'static str {
        match self {
            TypedValue::Text(_) => "text",
            TypedValue::Integer(_) => "integer",
            TypedValue::Decimal(_) => "decimal",
            TypedValue::Boolean(_) => "boolean",
            TypedValue::Date(_) => "date",
        }
    }

    /// Canonical external rendering.
    ///
    /// Text verbatim, dates as YYYY-MM-DD, booleans as `true`/`false`.
    /// Presentation layers display this form and re-parse nothing.
    pub fn render(&self) -> String {
        match self {
            TypedValue::Text(text) => text.clone(),
            TypedValue::Integer(value) => value.to_string(),
            TypedValue::Decimal(value) => value.to_string(),
            TypedValue::Boolean(value) => value.to_string(),
            TypedValue::Date(date) => date.format(DATE_FORMAT).to_string(),
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
