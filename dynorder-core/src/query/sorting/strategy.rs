//! Strategy pattern for composable sorting
//!
//! [`FieldSort`] is the generic ordering operation instantiated for one
//! concrete key type. [`ChainedSort`] combines any number of type-erased
//! clauses into one stable multi-key sort.

use super::selector::TypedKeySelector;
use super::traits::{ExtractedKeys, KeyExtractor, SortKey};
use super::utils::{is_sorted_by, reorder_by_indices};
use crate::error::Result;
use crate::query::types::{OrderingRule, SortOrder};
use crate::record::ValueKind;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// A sorting strategy applied to a batch of records
pub trait SortStrategy<T>: Send + Sync {
    /// Apply this sorting strategy to the given items
    fn sort(&self, items: &mut [T]) -> Result<()>;
}

/// Single field sort with a statically known key type
pub struct FieldSort<T: 'static, K> {
    selector: TypedKeySelector<T, K>,
    order: SortOrder,
}

impl<T: 'static, K: SortKey> FieldSort<T, K> {
    /// Create a new field sort strategy
    pub fn new(selector: TypedKeySelector<T, K>, order: SortOrder) -> Self {
        Self { selector, order }
    }
}

impl<T, K> KeyExtractor<T> for FieldSort<T, K>
where
    T: Send + Sync + 'static,
    K: SortKey,
{
    fn field(&self) -> &'static str {
        self.selector.field()
    }

    fn order(&self) -> SortOrder {
        self.order
    }

    fn key_kind(&self) -> ValueKind {
        K::KIND
    }

    fn extract(&self, records: &[T]) -> Result<Box<dyn ExtractedKeys>> {
        // Extract keys once for efficiency
        let keys = records
            .iter()
            .map(|record| self.selector.key(record))
            .collect::<Result<Vec<K>>>()?;

        Ok(Box::new(TypedKeys {
            keys,
            reverse: self.order.is_descending(),
        }))
    }
}

impl<T, K> SortStrategy<T> for FieldSort<T, K>
where
    T: Clone + Send + Sync + 'static,
    K: SortKey,
{
    fn sort(&self, items: &mut [T]) -> Result<()> {
        let keys = self.extract(items)?;
        let mut indices: Vec<usize> = (0..items.len()).collect();
        indices.sort_by(|&a, &b| keys.compare(a, b));
        reorder_by_indices(items, &indices);
        Ok(())
    }
}

impl<T: 'static, K> fmt::Debug for FieldSort<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSort")
            .field("selector", &self.selector)
            .field("order", &self.order)
            .finish()
    }
}

struct TypedKeys<K> {
    keys: Vec<K>,
    reverse: bool,
}

impl<K: SortKey> ExtractedKeys for TypedKeys<K> {
    #[inline]
    fn compare(&self, a: usize, b: usize) -> Ordering {
        self.keys[a].compare_with_order(&self.keys[b], self.reverse)
    }

    fn len(&self) -> usize {
        self.keys.len()
    }
}

/// A type-erased ordering clause
pub type OrderClause<T> = Arc<dyn KeyExtractor<T>>;

/// Multi-field sort with stable sorting
///
/// The first clause is the primary ordering; each later clause only breaks
/// ties left by the ones before it. Records tied on every clause keep their
/// input order.
pub struct ChainedSort<T> {
    clauses: Vec<OrderClause<T>>,
}

impl<T> ChainedSort<T> {
    /// Create a chained sort with a primary clause
    pub fn new(primary: OrderClause<T>) -> Self {
        Self {
            clauses: vec![primary],
        }
    }

    /// Add a tie-break clause to the chain
    pub fn then_by(mut self, clause: OrderClause<T>) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn clauses(&self) -> &[OrderClause<T>] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// The clauses as plain rules, primary first
    pub fn rules(&self) -> Vec<OrderingRule> {
        self.clauses
            .iter()
            .map(|clause| OrderingRule::new(clause.field(), clause.order()))
            .collect()
    }
}

impl<T: Clone + Send + Sync> SortStrategy<T> for ChainedSort<T> {
    fn sort(&self, items: &mut [T]) -> Result<()> {
        let keys = self
            .clauses
            .iter()
            .map(|clause| clause.extract(items))
            .collect::<Result<Vec<_>>>()?;

        let compare = |a: &usize, b: &usize| {
            keys.iter()
                .map(|clause_keys| clause_keys.compare(*a, *b))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        };

        let mut indices: Vec<usize> = (0..items.len()).collect();
        if is_sorted_by(&indices, compare) {
            trace!(records = items.len(), "input already ordered");
            return Ok(());
        }

        // `sort_by` is stable, ties keep input order
        indices.sort_by(compare);

        trace!(
            clauses = self.clauses.len(),
            records = items.len(),
            "applied chained sort"
        );
        reorder_by_indices(items, &indices);
        Ok(())
    }
}

impl<T> Clone for ChainedSort<T> {
    fn clone(&self) -> Self {
        Self {
            clauses: self.clauses.clone(),
        }
    }
}

impl<T> fmt::Debug for ChainedSort<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clauses: Vec<String> = self
            .clauses
            .iter()
            .map(|clause| format!("{}:{}", clause.field(), clause.order()))
            .collect();

        f.debug_struct("ChainedSort")
            .field("clauses", &clauses)
            .finish()
    }
}
