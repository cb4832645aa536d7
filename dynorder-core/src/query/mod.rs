pub mod builder;
pub mod dynamic;
pub mod sorting;
pub mod source;
pub mod types;

pub use builder::{OrderedQuery, Query, QueryContext};
pub use dynamic::{DynamicQuery, apply_ordering};
pub use sorting::*;
pub use source::{InMemorySource, JsonFileSource, RecordSource};
pub use types::*;
