//! Catalog subsystem
//!
//! Products and their per-attribute value records. Values enter only
//! through the codec, so everything stored satisfies its attribute's
//! declared type.
//!
//! # Invariants
//!
//! - SKUs are unique across the whole catalog
//! - Prices are finite and non-negative
//! - At most one value per (product, attribute), enforced by the map key
//! - Product creation is all-or-nothing

mod errors;
pub(crate) mod store;
pub mod types;

pub use errors::{CatalogError, CatalogResult};
pub use types::{Product, ProductId, ValueId, ValueRecord};
