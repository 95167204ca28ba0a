//! Typed value codec
//!
//! The boundary between the untyped external world (raw strings from
//! forms and imports) and the typed storage slots. Values cross it in
//! both directions through the owning attribute's declared data type;
//! nothing is ever inferred from the value itself.

mod codec;
mod errors;
mod value;

pub use codec::{decode, encode};
pub use errors::{CodecError, CodecResult};
pub use value::TypedValue;
