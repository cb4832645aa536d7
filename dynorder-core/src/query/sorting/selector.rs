//! Key selectors built from runtime field names
//!
//! [`KeySelector`] is the type-erased "read field F off a record" accessor:
//! it maps `T` to *some* [`FieldValue`]. [`TypedKeySelector`] commits to a
//! concrete [`SortKey`] once the key type has been chosen.

use super::traits::SortKey;
use crate::error::{OrderError, Result};
use crate::record::{FieldDescriptor, FieldValue, ValueKind};
use std::fmt;
use std::marker::PhantomData;

/// Reads one field off a record without naming the field's type
pub struct KeySelector<T: 'static> {
    descriptor: &'static FieldDescriptor<T>,
}

impl<T: 'static> KeySelector<T> {
    pub fn new(descriptor: &'static FieldDescriptor<T>) -> Self {
        Self { descriptor }
    }

    pub fn field(&self) -> &'static str {
        self.descriptor.name()
    }

    /// Declared kind of the selected field
    pub fn kind(&self) -> ValueKind {
        self.descriptor.kind()
    }

    #[inline]
    pub fn select(&self, record: &T) -> FieldValue {
        self.descriptor.read(record)
    }

    /// Commit to a concrete key type, checking it against the field's kind
    pub fn typed<K: SortKey>(self) -> Result<TypedKeySelector<T, K>> {
        if K::KIND != self.kind() {
            return Err(OrderError::ValueKindMismatch {
                field: self.field().to_string(),
                expected: self.kind(),
                found: K::KIND,
            });
        }
        Ok(TypedKeySelector {
            selector: self,
            _key: PhantomData,
        })
    }
}

impl<T: 'static> Clone for KeySelector<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for KeySelector<T> {}

impl<T: 'static> fmt::Debug for KeySelector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeySelector")
            .field("field", &self.field())
            .field("kind", &self.kind())
            .finish()
    }
}

/// A key selector bound to a concrete sort key type
pub struct TypedKeySelector<T: 'static, K> {
    selector: KeySelector<T>,
    _key: PhantomData<fn() -> K>,
}

impl<T: 'static, K: SortKey> TypedKeySelector<T, K> {
    pub fn field(&self) -> &'static str {
        self.selector.field()
    }

    /// Extract this record's key
    ///
    /// Fails when the record yields a value of another kind than declared.
    pub fn key(&self, record: &T) -> Result<K> {
        let value = self.selector.select(record);
        let found = value.kind();
        K::from_value(value).ok_or_else(|| OrderError::ValueKindMismatch {
            field: self.field().to_string(),
            expected: K::KIND,
            found: found.unwrap_or(K::KIND),
        })
    }
}

impl<T: 'static, K> fmt::Debug for TypedKeySelector<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedKeySelector")
            .field("selector", &self.selector)
            .field("key", &std::any::type_name::<K>())
            .finish()
    }
}
