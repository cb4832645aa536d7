//! # dynorder core
//!
//! Order lazily evaluated record queries by a field name that is only known
//! at runtime, without the caller naming the field's value type.
//!
//! - [`record`]: records, field descriptors and dynamically typed values
//! - [`query`]: the query pipeline, sort keys, the key registry and the
//!   operator catalog
//! - [`config`]: settings for field matching, text collation and limits
//!
//! ```no_run
//! use dynorder_core::{Query, SortOrder, demo::{Person, sample_people}};
//!
//! # async fn run() -> dynorder_core::Result<()> {
//! let query = Query::<Person>::from_records(sample_people());
//! let people = query
//!     .order_by("Height", SortOrder::Ascending)?
//!     .then_by("Name", SortOrder::Ascending)?
//!     .fetch()
//!     .await?;
//! assert_eq!(people[0].name, "Cid");
//! # Ok(())
//! # }
//! ```

#![allow(missing_docs)]

pub mod config;
pub mod demo;
pub mod error;
pub mod query;
pub mod record;

pub use config::{FieldMatching, OrderingConfig, TextCollation};
pub use error::{OrderError, Result};
pub use query::{
    ClausePosition, DynamicQuery, InMemorySource, JsonFileSource, KeyRegistry,
    OrderedQuery, OrderingRule, OrderingRules, Query, QueryContext,
    RecordSource, SortOrder, apply_ordering,
};
pub use record::{FieldDescriptor, FieldValue, Record, ValueKind};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
