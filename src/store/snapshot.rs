//! Durable snapshot persistence
//!
//! The whole catalog persists as one file with two parts:
//!
//! 1. A single-line JSON header: `{"format":1,"checksum":"crc32:xxxxxxxx"}`
//! 2. The JSON state body the checksum covers
//!
//! Write sequence, in strict order:
//!
//! 1. Serialize the state body and checksum it
//! 2. Write header + body to a sibling `.tmp` file
//! 3. fsync the temp file
//! 4. Rename over the live file
//! 5. fsync the directory
//!
//! A crash at any point leaves either the previous snapshot or the new
//! one, never a torn mix, and a failed save removes its temp file
//! before surfacing the error. Load verifies the checksum before
//! deserializing and treats a missing file as an empty catalog.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use super::errors::{StoreError, StoreResult};
use super::state::{CatalogState, STATE_FORMAT};

/// Computes a CRC32 (IEEE) checksum over the provided data.
///
/// Deterministic: the same input always produces the same output.
pub fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Formats a CRC32 checksum for the snapshot header.
///
/// Format: `crc32:XXXXXXXX` (lowercase hex, 8 characters, zero-padded)
pub fn format_checksum(checksum: u32) -> String {
    format!("crc32:{:08x}", checksum)
}

/// Parses a formatted checksum back to u32, `None` if malformed.
pub fn parse_checksum(formatted: &str) -> Option<u32> {
    let stripped = formatted.strip_prefix("crc32:")?;
    u32::from_str_radix(stripped, 16).ok()
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotHeader {
    format: u32,
    checksum: String,
}

/// Handle on the snapshot file of one catalog.
#[derive(Debug, Clone)]
pub struct Snapshot {
    path: PathBuf,
}

impl Snapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and verifies the snapshot.
    ///
    /// `Ok(None)` when the file does not exist yet; `SnapshotCorrupt`
    /// when the header is malformed, the format is unknown or the body
    /// fails its checksum.
    pub fn load(&self) -> StoreResult<Option<CatalogState>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        let newline = bytes
            .iter()
            .position(|&b| b == b'\n')
            .ok_or_else(|| StoreError::SnapshotCorrupt("missing header line".into()))?;
        let (header_bytes, rest) = bytes.split_at(newline);
        let body = &rest[1..];

        let header: SnapshotHeader = serde_json::from_slice(header_bytes)
            .map_err(|e| StoreError::SnapshotCorrupt(format!("malformed header: {}", e)))?;

        if header.format != STATE_FORMAT {
            return Err(StoreError::SnapshotCorrupt(format!(
                "unsupported format {}",
                header.format
            )));
        }

        let expected = parse_checksum(&header.checksum).ok_or_else(|| {
            StoreError::SnapshotCorrupt(format!("malformed checksum '{}'", header.checksum))
        })?;
        let actual = compute_checksum(body);
        if actual != expected {
            return Err(StoreError::SnapshotCorrupt(format!(
                "checksum mismatch: header {}, body {}",
                format_checksum(expected),
                format_checksum(actual)
            )));
        }

        let state = serde_json::from_slice(body)?;
        Ok(Some(state))
    }

    /// Atomically persists the state.
    pub fn save(&self, state: &CatalogState) -> StoreResult<()> {
        let body = serde_json::to_vec(state)?;
        let header = SnapshotHeader {
            format: state.format,
            checksum: format_checksum(compute_checksum(&body)),
        };

        let mut bytes = serde_json::to_vec(&header)?;
        bytes.push(b'\n');
        bytes.extend_from_slice(&body);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let tmp = self.tmp_path();
        if let Err(e) = write_and_sync(&tmp, &bytes) {
            // A failed write must not leave a half-written temp file behind
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::io(&tmp, e));
        }

        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::io(&self.path, e));
        }

        if let Some(parent) = self.path.parent() {
            fsync_dir(parent)?;
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

fn write_and_sync(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    // fsync is mandatory before the rename makes the file live
    file.sync_all()
}

/// fsync a directory so a completed rename survives power loss.
///
/// On Unix, this opens the directory and calls fsync on it.
fn fsync_dir(path: &Path) -> StoreResult<()> {
    let dir = OpenOptions::new()
        .read(true)
        .open(path)
        .map_err(|e| StoreError::io(path, e))?;
    dir.sync_all().map_err(|e| StoreError::io(path, e))
}
