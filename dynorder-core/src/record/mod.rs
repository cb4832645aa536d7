//! Record types addressable by field name
//!
//! - [`value`]: dynamically typed field values and their kinds
//! - [`schema`]: static field descriptors and name resolution

pub mod schema;
pub mod value;

pub use schema::{FieldDescriptor, Record, resolve_field};
pub use value::{FieldValue, ValueKind};
