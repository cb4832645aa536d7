//! Record schemas and field-name resolution

use super::value::{FieldValue, ValueKind};
use crate::config::FieldMatching;
use crate::error::{OrderError, Result};
use std::fmt;
use tracing::{debug, warn};

/// Static description of one readable field on a record type
pub struct FieldDescriptor<T> {
    name: &'static str,
    kind: ValueKind,
    nullable: bool,
    read: fn(&T) -> FieldValue,
}

impl<T> FieldDescriptor<T> {
    /// Describe a non-nullable field
    pub const fn new(
        name: &'static str,
        kind: ValueKind,
        read: fn(&T) -> FieldValue,
    ) -> Self {
        Self {
            name,
            kind,
            nullable: false,
            read,
        }
    }

    /// Mark this field as possibly holding [`FieldValue::Null`]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Read this field off a record
    #[inline]
    pub fn read(&self, record: &T) -> FieldValue {
        (self.read)(record)
    }
}

// Manual impls so `T` needs no `Clone`/`Debug` bounds.
impl<T> Clone for FieldDescriptor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldDescriptor<T> {}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("nullable", &self.nullable)
            .finish()
    }
}

/// A record type whose fields can be addressed by name at runtime
///
/// Field names and kinds are fixed per type; callers only need the name.
pub trait Record: Clone + Send + Sync + 'static {
    /// Entity name used in errors and logs
    const ENTITY: &'static str;

    /// Every field that can be used as an ordering key
    const FIELDS: &'static [FieldDescriptor<Self>];

    /// Look up a field descriptor by name
    fn field(
        name: &str,
        matching: FieldMatching,
    ) -> Result<&'static FieldDescriptor<Self>> {
        resolve_field(Self::ENTITY, Self::FIELDS, name, matching)
    }

    /// Names of all declared fields, in declaration order
    fn field_names() -> Vec<&'static str> {
        Self::FIELDS.iter().map(|field| field.name()).collect()
    }
}

/// Resolve `name` against a field list
///
/// Exact matches always win. With [`FieldMatching::IgnoreCase`] a single
/// ASCII case-insensitive match is accepted; several are ambiguous.
pub fn resolve_field<T>(
    entity: &'static str,
    fields: &'static [FieldDescriptor<T>],
    name: &str,
    matching: FieldMatching,
) -> Result<&'static FieldDescriptor<T>> {
    if let Some(field) = fields.iter().find(|field| field.name == name) {
        debug!(entity, field = field.name, kind = %field.kind, "resolved field");
        return Ok(field);
    }

    if matching == FieldMatching::IgnoreCase {
        let candidates: Vec<&'static FieldDescriptor<T>> = fields
            .iter()
            .filter(|field| field.name.eq_ignore_ascii_case(name))
            .collect();

        match candidates.as_slice() {
            [field] => {
                warn!(
                    entity,
                    requested = name,
                    field = field.name,
                    "resolved field by case-insensitive match"
                );
                return Ok(*field);
            }
            [] => {}
            _ => {
                return Err(OrderError::AmbiguousField {
                    entity,
                    field: name.to_string(),
                    candidates: candidates.iter().map(|f| f.name).collect(),
                });
            }
        }
    }

    Err(OrderError::FieldNotFound {
        entity,
        field: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Clash {
        lower: i64,
        upper: i64,
    }

    impl Record for Clash {
        const ENTITY: &'static str = "Clash";
        const FIELDS: &'static [FieldDescriptor<Self>] = &[
            FieldDescriptor::new("size", ValueKind::Int, |c: &Clash| {
                FieldValue::Int(c.lower)
            }),
            FieldDescriptor::new("Size", ValueKind::Int, |c: &Clash| {
                FieldValue::Int(c.upper)
            }),
            FieldDescriptor::new("Label", ValueKind::Text, |_: &Clash| {
                FieldValue::Null
            })
            .nullable(),
        ];
    }

    #[test]
    fn exact_match_beats_case_insensitive_candidates() {
        let field = Clash::field("Size", FieldMatching::IgnoreCase).unwrap();
        let record = Clash { lower: 1, upper: 2 };
        assert_eq!(field.read(&record), FieldValue::Int(2));
    }

    #[test]
    fn case_insensitive_match_requires_a_single_candidate() {
        let err = Clash::field("SIZE", FieldMatching::IgnoreCase).unwrap_err();
        assert!(matches!(err, OrderError::AmbiguousField { .. }));

        let field = Clash::field("label", FieldMatching::IgnoreCase).unwrap();
        assert_eq!(field.name(), "Label");
        assert!(field.is_nullable());
    }

    #[test]
    fn exact_matching_rejects_other_casing() {
        let err = Clash::field("label", FieldMatching::Exact).unwrap_err();
        assert!(matches!(
            err,
            OrderError::FieldNotFound { entity: "Clash", ref field } if field == "label"
        ));
    }

    #[test]
    fn field_names_follow_declaration_order() {
        assert_eq!(Clash::field_names(), vec!["size", "Size", "Label"]);
    }
}
