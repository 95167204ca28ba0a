//! Schema type definitions
//!
//! A Category owns a variable set of Attributes; each Attribute declares
//! the type every submitted value for it must satisfy:
//! - text: UTF-8 string, stored verbatim
//! - integer: base-10 64-bit signed integer
//! - decimal: 64-bit floating point
//! - boolean: the token "true" (any ASCII case) and nothing else
//! - date: calendar date in YYYY-MM-DD
//! - enum: one of the attribute's declared options, byte-for-byte

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::SchemaError;

/// Category identifier, allocated monotonically by the backing store.
pub type CategoryId = u64;

/// Attribute identifier, allocated monotonically by the backing store.
///
/// Attribute ids are the keys of every product's value map, so insertion
/// order of attributes is also id order.
pub type AttributeId = u64;

/// The closed set of attribute data types.
///
/// `Enum` has no storage slot of its own: enum values live in the text
/// slot, constrained to the attribute's option list at encode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// UTF-8 string
    Text,
    /// 64-bit signed integer
    Integer,
    /// 64-bit floating point
    Decimal,
    /// Boolean
    Boolean,
    /// Calendar date (YYYY-MM-DD)
    Date,
    /// One of a declared, ordered option list
    Enum,
}

impl DataType {
    /// Returns the external token for this type, as serialized in
    /// attribute listings and accepted by [`DataType::from_str`].
    pub fn type_name(&self) -> &'static str {
        match self {
            DataType::Text => "text",
            DataType::Integer => "integer",
            DataType::Decimal => "decimal",
            DataType::Boolean => "boolean",
            DataType::Date => "date",
            DataType::Enum => "enum",
        }
    }

    /// Returns the name of the storage slot a value of this type occupies.
    ///
    /// Exactly one slot per type; enum values share the text slot.
    pub fn slot_name(&self) -> &'static str {
        match self {
            DataType::Text | DataType::Enum => "text",
            DataType::Integer => "integer",
            DataType::Decimal => "decimal",
            DataType::Boolean => "boolean",
            DataType::Date => "date",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

impl FromStr for DataType {
    type Err = SchemaError;

    /// Parses the external token form against the closed set.
    ///
    /// This is the only place an invalid data type can enter the system;
    /// everything past this boundary carries the typed tag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(DataType::Text),
            "integer" => Ok(DataType::Integer),
            "decimal" => Ok(DataType::Decimal),
            "boolean" => Ok(DataType::Boolean),
            "date" => Ok(DataType::Date),
            "enum" => Ok(DataType::Enum),
            other => Err(SchemaError::InvalidDataType(other.to_string())),
        }
    }
}

/// A product category: the owner of an attribute schema and of products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique category identifier
    pub id: CategoryId,
    /// Unique display name
    pub name: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One attribute definition inside a category's schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Unique attribute identifier
    pub id: AttributeId,
    /// Owning category
    pub category_id: CategoryId,
    /// Display name
    pub name: String,
    /// Declared value type
    pub data_type: DataType,
    /// Permitted values, ordered; populated only for enum attributes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Whether every product of the category must carry a value
    #[serde(default)]
    pub is_required: bool,
}

impl Attribute {
    /// True when this attribute constrains its values to an option list.
    pub fn is_enum(&self) -> bool {
        self.data_type == DataType::Enum
    }

    /// Byte-for-byte membership test against the declared options.
    ///
    /// No trimming or case folding: `"64GB"` and `" 64GB"` are distinct.
    pub fn has_option(&self, raw: &str) -> bool {
        self.options.iter().any(|o| o == raw)
    }

    /// The options re-joined with commas, `""` when there are none.
    ///
    /// This is the external form attribute listings serialize.
    pub fn options_joined(&self) -> String {
        self.options.join(",")
    }
}

/// Splits the external comma-separated options form verbatim.
///
/// Segments are not trimmed; enum membership later is byte-for-byte, so
/// whatever bytes arrive here are exactly what a value must match.
pub(crate) fn split_options(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}
