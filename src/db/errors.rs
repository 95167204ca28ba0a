//! # Facade Errors
//!
//! One error type for the whole public surface, aggregating every
//! subsystem. Presentation layers branch on `code()` instead of
//! matching crate internals.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::codec::CodecError;
use crate::schema::SchemaError;
use crate::store::StoreError;

/// Result type for facade operations
pub type DbResult<T> = Result<T, DbError>;

/// Catalog facade errors
#[derive(Debug, Error)]
pub enum DbError {
    // ==================
    // Caller input errors
    // ==================
    /// Schema definition error
    #[error("{0}")]
    Schema(#[from] SchemaError),

    /// Product or value error
    #[error("{0}")]
    Catalog(#[from] CatalogError),

    // ==================
    // Persistence errors
    // ==================
    /// Snapshot load or save error
    #[error("{0}")]
    Store(#[from] StoreError),
}

impl DbError {
    /// Stable machine-readable token for this error's class.
    pub fn code(&self) -> &'static str {
        match self {
            DbError::Schema(SchemaError::DuplicateName(_)) => "DUPLICATE_NAME",
            DbError::Schema(SchemaError::UnknownCategory(_)) => "UNKNOWN_CATEGORY",
            DbError::Schema(SchemaError::InvalidDataType(_)) => "INVALID_DATA_TYPE",
            DbError::Schema(SchemaError::InvalidOptions(_)) => "INVALID_OPTIONS",

            DbError::Catalog(CatalogError::UnknownCategory(_)) => "UNKNOWN_CATEGORY",
            DbError::Catalog(CatalogError::UnknownProduct(_)) => "UNKNOWN_PRODUCT",
            DbError::Catalog(CatalogError::UnknownAttribute(_)) => "UNKNOWN_ATTRIBUTE",
            DbError::Catalog(CatalogError::DuplicateSku(_)) => "DUPLICATE_SKU",
            DbError::Catalog(CatalogError::InvalidPrice(_)) => "INVALID_PRICE",
            DbError::Catalog(CatalogError::Value { source, .. }) => codec_code(source),

            DbError::Store(StoreError::Io { .. }) => "IO_ERROR",
            DbError::Store(StoreError::SnapshotCorrupt(_)) => "SNAPSHOT_CORRUPT",
            DbError::Store(StoreError::Serialize(_)) => "SERIALIZE_ERROR",
        }
    }

    /// True when the error reports bad caller input rather than a
    /// persistence fault.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, DbError::Store(_))
    }
}

fn codec_code(source: &CodecError) -> &'static str {
    match source {
        CodecError::TypeMismatch { .. } => "TYPE_MISMATCH",
        CodecError::InvalidEnumValue { .. } => "INVALID_ENUM_VALUE",
        CodecError::MissingRequiredValue(_) => "MISSING_REQUIRED_VALUE",
    }
}
