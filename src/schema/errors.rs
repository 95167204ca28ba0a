//! # Schema Errors

use thiserror::Error;

use super::types::CategoryId;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Schema definition errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    // Category errors
    #[error("Category name already in use: {0}")]
    DuplicateName(String),

    #[error("Category not found: {0}")]
    UnknownCategory(CategoryId),

    // Attribute definition errors
    #[error("Invalid data type: {0}")]
    InvalidDataType(String),

    #[error("Invalid enum options: {0}")]
    InvalidOptions(String),
}
