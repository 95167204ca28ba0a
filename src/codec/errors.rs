//! # Codec Errors

use thiserror::Error;

use crate::schema::DataType;

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Value encoding and decoding errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    #[error("Value '{value}' does not satisfy type {expected}")]
    TypeMismatch { expected: DataType, value: String },

    #[error("Value '{value}' is not one of the declared options")]
    InvalidEnumValue { value: String },

    #[error("Missing value for required attribute '{0}'")]
    MissingRequiredValue(String),
}
