//! Dynamically typed field values
//!
//! A [`FieldValue`] is what a field reader hands back when the caller does
//! not know the field's Rust type. [`ValueKind`] is the runtime descriptor
//! used to pick a concrete sort key for a field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Runtime type descriptor for non-null field values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Bool,
    Int,
    UInt,
    Float,
    Text,
    Timestamp,
    Uuid,
}

impl ValueKind {
    /// All kinds, in declaration order
    pub const ALL: [ValueKind; 7] = [
        ValueKind::Bool,
        ValueKind::Int,
        ValueKind::UInt,
        ValueKind::Float,
        ValueKind::Text,
        ValueKind::Timestamp,
        ValueKind::Uuid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::UInt => "uint",
            ValueKind::Float => "float",
            ValueKind::Text => "text",
            ValueKind::Timestamp => "timestamp",
            ValueKind::Uuid => "uuid",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field value read off a record without static knowledge of its type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
    Uuid(Uuid),
}

impl FieldValue {
    /// Kind of this value, `None` for [`FieldValue::Null`]
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            FieldValue::Null => None,
            FieldValue::Bool(_) => Some(ValueKind::Bool),
            FieldValue::Int(_) => Some(ValueKind::Int),
            FieldValue::UInt(_) => Some(ValueKind::UInt),
            FieldValue::Float(_) => Some(ValueKind::Float),
            FieldValue::Text(_) => Some(ValueKind::Text),
            FieldValue::Timestamp(_) => Some(ValueKind::Timestamp),
            FieldValue::Uuid(_) => Some(ValueKind::Uuid),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::UInt(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::UInt(u64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        FieldValue::Float(f64::from(value))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(value)
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        FieldValue::Uuid(value)
    }
}

impl<V: Into<FieldValue>> From<Option<V>> for FieldValue {
    fn from(value: Option<V>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_has_no_kind() {
        assert_eq!(FieldValue::Null.kind(), None);
        assert_eq!(FieldValue::from(Option::<i64>::None), FieldValue::Null);
    }

    #[test]
    fn conversions_pick_matching_kind() {
        assert_eq!(FieldValue::from(3i32).kind(), Some(ValueKind::Int));
        assert_eq!(FieldValue::from(3u32).kind(), Some(ValueKind::UInt));
        assert_eq!(FieldValue::from(1.5f32).kind(), Some(ValueKind::Float));
        assert_eq!(FieldValue::from("x").kind(), Some(ValueKind::Text));
        assert_eq!(
            FieldValue::from(Some(Uuid::nil())).kind(),
            Some(ValueKind::Uuid)
        );
    }
}
