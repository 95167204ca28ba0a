//! # Store Errors

use std::path::PathBuf;

use thiserror::Error;

/// Result type for backing store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Snapshot persistence errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot corrupt: {0}")]
    SnapshotCorrupt(String),

    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_the_path() {
        let err = StoreError::io(
            "/data/catalog.fdb",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/data/catalog.fdb"));
    }

    #[test]
    fn test_corrupt_message() {
        let err = StoreError::SnapshotCorrupt("checksum mismatch".into());
        assert_eq!(err.to_string(), "Snapshot corrupt: checksum mismatch");
    }
}
