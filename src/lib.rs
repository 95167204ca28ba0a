//! facetdb - a strict, embeddable product-catalog engine
//!
//! Categories carry a dynamic schema of typed attributes; products carry
//! values for the attributes of their category. Every write is validated
//! against the owning attribute's declared type before anything is stored.

pub mod catalog;
pub mod codec;
pub mod config;
pub mod db;
pub mod observability;
pub mod schema;
pub mod store;
