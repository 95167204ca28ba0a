//! Backing store
//!
//! In-memory catalog state plus its durable, checksummed snapshot.
//!
//! # Invariants
//!
//! - The live snapshot file is replaced atomically (temp, fsync, rename)
//! - Every load verifies the CRC32 checksum before deserializing
//! - A missing snapshot file is an empty catalog, never an error

mod errors;
mod snapshot;
pub(crate) mod state;

pub use errors::{StoreError, StoreResult};
pub use snapshot::{compute_checksum, format_checksum, parse_checksum, Snapshot};
pub use state::{CatalogState, STATE_FORMAT};
