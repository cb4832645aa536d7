//! Sorting module for runtime-named field orderings
//!
//! This module provides:
//! - Sort key types and the traits tying them to field kinds
//! - Type-erased key selectors built from field descriptors
//! - A type-indexed registry choosing the key type for a field kind
//! - The query operator catalog and first/subsequent operator selection
//! - Stable single and multi-clause sort strategies

pub mod keys;
pub mod operation;
pub mod registry;
pub mod selector;
pub mod strategy;
pub mod traits;
pub mod utils;

#[cfg(test)]
mod tests;

pub use keys::*;
pub use operation::*;
pub use registry::*;
pub use selector::*;
pub use strategy::*;
pub use traits::*;
