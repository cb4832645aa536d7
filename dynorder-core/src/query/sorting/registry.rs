//! Type-indexed table of ordering operations
//!
//! The key type of a runtime-named field is only known as a [`ValueKind`].
//! [`KeyRegistry`] maps each kind to [`bind_ordering`] instantiated for one
//! concrete [`SortKey`], so choosing the generic instantiation is a table
//! lookup instead of a type known at the call site.

use super::keys::{
    BoolKey, FoldedStringKey, OptionalDateKey, OptionalFloatKey, OptionalI64Key,
    OptionalU64Key, StringKey, UuidKey,
};
use super::selector::KeySelector;
use super::strategy::{FieldSort, OrderClause};
use super::traits::SortKey;
use crate::config::{OrderingConfig, TextCollation};
use crate::error::{OrderError, Result};
use crate::query::types::SortOrder;
use crate::record::ValueKind;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A generic ordering operation instantiated for one key type
pub type OrderingBinder<T> = fn(KeySelector<T>, SortOrder) -> Result<OrderClause<T>>;

/// Build an ordering clause for key type `K`
pub fn bind_ordering<T, K>(
    selector: KeySelector<T>,
    order: SortOrder,
) -> Result<OrderClause<T>>
where
    T: Send + Sync + 'static,
    K: SortKey,
{
    let typed = selector.typed::<K>()?;
    Ok(Arc::new(FieldSort::new(typed, order)))
}

struct Binding<T: 'static> {
    key_type: &'static str,
    bind: OrderingBinder<T>,
}

impl<T: 'static> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            key_type: self.key_type,
            bind: self.bind,
        }
    }
}

/// Maps value kinds to the ordering operation for their key type
pub struct KeyRegistry<T: 'static> {
    bindings: HashMap<ValueKind, Binding<T>>,
}

impl<T: Send + Sync + 'static> KeyRegistry<T> {
    /// A registry with no bindings
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// A registry with every built-in key type
    pub fn standard(config: &OrderingConfig) -> Self {
        let mut registry = Self::empty();
        registry
            .register::<BoolKey>()
            .register::<OptionalI64Key>()
            .register::<OptionalU64Key>()
            .register::<OptionalFloatKey>()
            .register::<OptionalDateKey>()
            .register::<UuidKey>();

        match config.text_collation {
            TextCollation::Ordinal => registry.register::<StringKey>(),
            TextCollation::CaseInsensitive => {
                registry.register::<FoldedStringKey>()
            }
        };

        registry
    }

    /// Bind `K::KIND` to `K`, replacing any earlier binding for that kind
    pub fn register<K: SortKey>(&mut self) -> &mut Self {
        let key_type = std::any::type_name::<K>();
        if let Some(previous) = self.bindings.insert(
            K::KIND,
            Binding {
                key_type,
                bind: bind_ordering::<T, K>,
            },
        ) {
            debug!(
                kind = %K::KIND,
                previous = previous.key_type,
                key_type,
                "replaced sort key binding"
            );
        }
        self
    }

    /// Ordering operation registered for `kind`
    pub fn binding(&self, kind: ValueKind) -> Result<OrderingBinder<T>> {
        self.bindings
            .get(&kind)
            .map(|binding| binding.bind)
            .ok_or(OrderError::KeyTypeNotRegistered { kind })
    }

    /// Name of the key type registered for `kind`
    pub fn key_type(&self, kind: ValueKind) -> Option<&'static str> {
        self.bindings.get(&kind).map(|binding| binding.key_type)
    }

    /// Look up the operation for the selector's kind and invoke it
    pub fn bind(
        &self,
        selector: KeySelector<T>,
        order: SortOrder,
    ) -> Result<OrderClause<T>> {
        let bind = self.binding(selector.kind())?;
        debug!(
            field = selector.field(),
            kind = %selector.kind(),
            key_type = self.key_type(selector.kind()).unwrap_or("?"),
            %order,
            "binding ordering clause"
        );
        bind(selector, order)
    }
}

impl<T: 'static> Clone for KeyRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            bindings: self.bindings.clone(),
        }
    }
}

impl<T: 'static> fmt::Debug for KeyRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self
            .bindings
            .iter()
            .map(|(kind, binding)| (kind.as_str(), binding.key_type))
            .collect();
        kinds.sort();

        f.debug_struct("KeyRegistry")
            .field("bindings", &kinds)
            .finish()
    }
}
