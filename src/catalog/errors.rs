//! # Catalog Errors

use thiserror::Error;

use crate::codec::CodecError;
use crate::schema::types::{AttributeId, CategoryId};

use super::types::ProductId;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Product and value errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    // Referential errors
    #[error("Category not found: {0}")]
    UnknownCategory(CategoryId),

    #[error("Product not found: {0}")]
    UnknownProduct(ProductId),

    #[error("Attribute {0} does not belong to the product's category")]
    UnknownAttribute(AttributeId),

    // Product field errors
    #[error("SKU already in use: {0}")]
    DuplicateSku(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(f64),

    // Value errors, named after the failing attribute
    #[error("Invalid value for attribute '{attribute}': {source}")]
    Value {
        attribute: String,
        #[source]
        source: CodecError,
    },
}
