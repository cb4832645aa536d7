//! Core traits for runtime-selected orderings
//!
//! A [`SortKey`] is the concrete, comparable type extracted for one field
//! kind. A [`KeyExtractor`] hides that type behind a trait object so a
//! query can carry clauses whose key types differ and are only known at
//! runtime.

use crate::error::Result;
use crate::query::types::SortOrder;
use crate::record::{FieldValue, ValueKind};
use std::cmp::Ordering;

/// Keys that can be compared for sorting
///
/// All sort keys must be comparable and handle missing data gracefully.
pub trait SortKey: Ord + Clone + Send + Sync + 'static {
    /// Kind of field value this key is built from
    const KIND: ValueKind;

    /// Create a key representing missing/null data
    fn missing() -> Self;

    /// Check if this key represents missing data
    fn is_missing(&self) -> bool;

    /// Build a key from a field value
    ///
    /// [`FieldValue::Null`] maps to [`SortKey::missing`]. Returns `None` when
    /// the value is of another kind.
    fn from_value(value: FieldValue) -> Option<Self>;

    /// Compare two keys while ensuring missing values always sort last
    #[inline]
    fn compare_with_order(&self, other: &Self, reverse: bool) -> Ordering {
        match (self.is_missing(), other.is_missing()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                if reverse {
                    other.cmp(self)
                } else {
                    self.cmp(other)
                }
            }
        }
    }
}

/// Type-erased ordering clause over records of type `T`
pub trait KeyExtractor<T>: Send + Sync {
    /// Name of the field this clause orders by
    fn field(&self) -> &'static str;

    /// Direction of this clause
    fn order(&self) -> SortOrder;

    /// Kind of key this clause compares
    fn key_kind(&self) -> ValueKind;

    /// Extract one key per record, in record order
    fn extract(&self, records: &[T]) -> Result<Box<dyn ExtractedKeys>>;
}

/// Keys extracted for a batch of records, compared by record index
pub trait ExtractedKeys {
    /// Compare the keys of records `a` and `b` in this clause's direction
    fn compare(&self, a: usize, b: usize) -> Ordering;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
