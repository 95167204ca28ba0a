//! Schema subsystem
//!
//! Categories and their typed attribute definitions. Attributes are
//! first-class schema artifacts enforced at write time:
//!
//! - Every product value is validated against its attribute's declared type
//! - Enum attributes constrain values to a declared option list
//! - Types are fixed once declared; there is no coercion between slots
//! - Validation failures abort the whole write

mod errors;
pub(crate) mod store;
pub mod types;

pub use errors::{SchemaError, SchemaResult};
pub use types::{Attribute, AttributeId, Category, CategoryId, DataType};
