//! Read-only projections for presentation layers

use serde::Serialize;

use crate::catalog::types::ProductId;
use crate::schema::types::{Attribute, AttributeId, CategoryId, DataType};

/// One attribute in the form-generation listing.
///
/// The wire shape a presentation layer consumes to render a dynamic
/// form for a category: `{id, name, data_type, options}` with the
/// options re-joined into a comma-separated string, `""` when there
/// are none.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeInfo {
    pub id: AttributeId,
    pub name: String,
    pub data_type: DataType,
    pub options: String,
}

impl From<&Attribute> for AttributeInfo {
    fn from(attribute: &Attribute) -> Self {
        Self {
            id: attribute.id,
            name: attribute.name.clone(),
            data_type: attribute.data_type,
            options: attribute.options_joined(),
        }
    }
}

/// One decoded value inside a [`ProductView`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeValueView {
    pub attribute_id: AttributeId,
    /// The attribute's display name
    pub attribute: String,
    pub data_type: DataType,
    /// Canonical rendering of the stored value
    pub value: String,
}

/// A product with its values decoded and rendered for display.
///
/// Values appear in attribute insertion order and only for attributes
/// that actually have a stored record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductView {
    pub id: ProductId,
    pub category_id: CategoryId,
    /// The owning category's display name
    pub category: String,
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub values: Vec<AttributeValueView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_info_wire_shape() {
        let attribute = Attribute {
            id: 7,
            category_id: 1,
            name: "Storage".into(),
            data_type: DataType::Enum,
            options: vec!["64GB".into(), "128GB".into()],
            is_required: false,
        };
        let info = AttributeInfo::from(&attribute);

        let json = serde_json::to_string(&info).unwrap();
        assert_eq!(
            json,
            r#"{"id":7,"name":"Storage","data_type":"enum","options":"64GB,128GB"}"#
        );
    }

    #[test]
    fn test_options_empty_string_when_none() {
        let attribute = Attribute {
            id: 1,
            category_id: 1,
            name: "OS".into(),
            data_type: DataType::Text,
            options: Vec::new(),
            is_required: false,
        };
        let info = AttributeInfo::from(&attribute);
        assert_eq!(info.options, "");

        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains(r#""options":"""#));
    }
}
