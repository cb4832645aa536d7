//! Sort key types for comparing records
//!
//! These types wrap the values read off a record and handle missing data
//! gracefully in their Ord implementations: present values come first.

use super::traits::SortKey;
use crate::record::{FieldValue, ValueKind};
use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use uuid::Uuid;

#[inline]
fn present_first<V: Ord>(a: &Option<V>, b: &Option<V>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less, // Items with values come first
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Boolean key, `false` before `true`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BoolKey(Option<bool>);

impl BoolKey {
    pub fn new(value: Option<bool>) -> Self {
        BoolKey(value)
    }
}

impl Ord for BoolKey {
    fn cmp(&self, other: &Self) -> Ordering {
        present_first(&self.0, &other.0)
    }
}

impl PartialOrd for BoolKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl SortKey for BoolKey {
    const KIND: ValueKind = ValueKind::Bool;

    fn missing() -> Self {
        BoolKey(None)
    }

    fn is_missing(&self) -> bool {
        self.0.is_none()
    }

    fn from_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Bool(v) => Some(BoolKey(Some(v))),
            FieldValue::Null => Some(Self::missing()),
            _ => None,
        }
    }
}

/// Signed integer key for identifiers, measurements and counts
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OptionalI64Key(Option<i64>);

impl OptionalI64Key {
    pub fn new(value: Option<i64>) -> Self {
        OptionalI64Key(value)
    }
}

impl Ord for OptionalI64Key {
    fn cmp(&self, other: &Self) -> Ordering {
        present_first(&self.0, &other.0)
    }
}

impl PartialOrd for OptionalI64Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl SortKey for OptionalI64Key {
    const KIND: ValueKind = ValueKind::Int;

    fn missing() -> Self {
        OptionalI64Key(None)
    }

    fn is_missing(&self) -> bool {
        self.0.is_none()
    }

    fn from_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Int(v) => Some(OptionalI64Key(Some(v))),
            FieldValue::Null => Some(Self::missing()),
            _ => None,
        }
    }
}

/// Unsigned integer key for large numeric values (sizes, counters)
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OptionalU64Key(Option<u64>);

impl OptionalU64Key {
    pub fn new(value: Option<u64>) -> Self {
        OptionalU64Key(value)
    }
}

impl Ord for OptionalU64Key {
    fn cmp(&self, other: &Self) -> Ordering {
        present_first(&self.0, &other.0)
    }
}

impl PartialOrd for OptionalU64Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl SortKey for OptionalU64Key {
    const KIND: ValueKind = ValueKind::UInt;

    fn missing() -> Self {
        OptionalU64Key(None)
    }

    fn is_missing(&self) -> bool {
        self.0.is_none()
    }

    fn from_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::UInt(v) => Some(OptionalU64Key(Some(v))),
            FieldValue::Null => Some(Self::missing()),
            _ => None,
        }
    }
}

/// Float key for numeric sorting (ratings, scores, ratios)
///
/// NaN sorts above every other present value.
#[derive(Clone, Debug, PartialEq)]
pub struct OptionalFloatKey(Option<OrderedFloat<f64>>);

impl OptionalFloatKey {
    pub fn new(value: Option<f64>) -> Self {
        OptionalFloatKey(value.map(OrderedFloat))
    }
}

impl Eq for OptionalFloatKey {}

impl Ord for OptionalFloatKey {
    fn cmp(&self, other: &Self) -> Ordering {
        present_first(&self.0, &other.0)
    }
}

impl PartialOrd for OptionalFloatKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl SortKey for OptionalFloatKey {
    const KIND: ValueKind = ValueKind::Float;

    fn missing() -> Self {
        OptionalFloatKey(None)
    }

    fn is_missing(&self) -> bool {
        self.0.is_none()
    }

    fn from_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Float(v) => Some(OptionalFloatKey::new(Some(v))),
            FieldValue::Null => Some(Self::missing()),
            _ => None,
        }
    }
}

/// String key for ordinal text sorting
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StringKey(Option<String>);

impl StringKey {
    pub fn new(value: Option<String>) -> Self {
        StringKey(value)
    }
}

impl Ord for StringKey {
    fn cmp(&self, other: &Self) -> Ordering {
        present_first(&self.0, &other.0)
    }
}

impl PartialOrd for StringKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl SortKey for StringKey {
    const KIND: ValueKind = ValueKind::Text;

    fn missing() -> Self {
        StringKey(None)
    }

    fn is_missing(&self) -> bool {
        self.0.is_none()
    }

    fn from_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Text(v) => Some(StringKey(Some(v))),
            FieldValue::Null => Some(Self::missing()),
            _ => None,
        }
    }
}

/// String key compared on lowercased text
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FoldedStringKey(Option<String>);

impl FoldedStringKey {
    pub fn new(value: Option<String>) -> Self {
        FoldedStringKey(value.map(|text| text.to_lowercase()))
    }
}

impl Ord for FoldedStringKey {
    fn cmp(&self, other: &Self) -> Ordering {
        present_first(&self.0, &other.0)
    }
}

impl PartialOrd for FoldedStringKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl SortKey for FoldedStringKey {
    const KIND: ValueKind = ValueKind::Text;

    fn missing() -> Self {
        FoldedStringKey(None)
    }

    fn is_missing(&self) -> bool {
        self.0.is_none()
    }

    fn from_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Text(v) => Some(FoldedStringKey::new(Some(v))),
            FieldValue::Null => Some(Self::missing()),
            _ => None,
        }
    }
}

/// Date/time key for temporal sorting
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OptionalDateKey(Option<DateTime<Utc>>);

impl OptionalDateKey {
    pub fn new(value: Option<DateTime<Utc>>) -> Self {
        OptionalDateKey(value)
    }
}

impl Ord for OptionalDateKey {
    fn cmp(&self, other: &Self) -> Ordering {
        present_first(&self.0, &other.0)
    }
}

impl PartialOrd for OptionalDateKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl SortKey for OptionalDateKey {
    const KIND: ValueKind = ValueKind::Timestamp;

    fn missing() -> Self {
        OptionalDateKey(None)
    }

    fn is_missing(&self) -> bool {
        self.0.is_none()
    }

    fn from_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Timestamp(v) => Some(OptionalDateKey(Some(v))),
            FieldValue::Null => Some(Self::missing()),
            _ => None,
        }
    }
}

/// UUID key, ordered by byte value
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UuidKey(Option<Uuid>);

impl UuidKey {
    pub fn new(value: Option<Uuid>) -> Self {
        UuidKey(value)
    }
}

impl Ord for UuidKey {
    fn cmp(&self, other: &Self) -> Ordering {
        present_first(&self.0, &other.0)
    }
}

impl PartialOrd for UuidKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl SortKey for UuidKey {
    const KIND: ValueKind = ValueKind::Uuid;

    fn missing() -> Self {
        UuidKey(None)
    }

    fn is_missing(&self) -> bool {
        self.0.is_none()
    }

    fn from_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Uuid(v) => Some(UuidKey(Some(v))),
            FieldValue::Null => Some(Self::missing()),
            _ => None,
        }
    }
}
