//! Catalog configuration
//!
//! Two modes:
//! - Durable: a data directory holds the snapshot file; every committed
//!   mutation rewrites it atomically.
//! - In-memory: no data directory, nothing touches disk. For tests and
//!   embedders that do their own persistence.

use std::path::{Path, PathBuf};

/// Default snapshot file name inside the data directory.
pub const DEFAULT_SNAPSHOT_FILE: &str = "catalog.fdb";

/// Configuration for one catalog instance.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Data directory; `None` keeps the catalog in memory.
    pub data_dir: Option<PathBuf>,
    /// Snapshot file name inside the data directory.
    pub snapshot_file: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_dir: None, // In-memory unless a directory is given
            snapshot_file: DEFAULT_SNAPSHOT_FILE.to_string(),
        }
    }
}

impl CatalogConfig {
    /// Create a config that keeps the catalog in memory.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Create a config that persists under the given directory.
    pub fn durable(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(data_dir.into()),
            ..Self::default()
        }
    }

    /// Override the snapshot file name.
    pub fn with_snapshot_file(mut self, name: impl Into<String>) -> Self {
        self.snapshot_file = name.into();
        self
    }

    /// Check whether this config persists to disk.
    pub fn is_durable(&self) -> bool {
        self.data_dir.is_some()
    }

    /// Full path of the snapshot file, `None` in memory mode.
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        self.data_dir
            .as_deref()
            .map(|dir: &Path| dir.join(&self.snapshot_file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_in_memory() {
        let config = CatalogConfig::default();
        assert!(!config.is_durable());
        assert_eq!(config.snapshot_path(), None);
        assert_eq!(config.snapshot_file, DEFAULT_SNAPSHOT_FILE);
    }

    #[test]
    fn test_durable_joins_snapshot_path() {
        let config = CatalogConfig::durable("/var/lib/facetdb");
        assert!(config.is_durable());
        assert_eq!(
            config.snapshot_path(),
            Some(PathBuf::from("/var/lib/facetdb/catalog.fdb"))
        );
    }

    #[test]
    fn test_snapshot_file_override() {
        let config = CatalogConfig::durable("/data").with_snapshot_file("store.fdb");
        assert_eq!(
            config.snapshot_path(),
            Some(PathBuf::from("/data/store.fdb"))
        );
    }
}
