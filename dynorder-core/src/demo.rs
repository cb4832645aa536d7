//! A small record type for demos and tests

use crate::record::{FieldDescriptor, FieldValue, Record, ValueKind};
use serde::{Deserialize, Serialize};

/// A person with an identifier, a name and a height in centimetres
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub height: i64,
}

impl Person {
    pub fn new(id: i64, name: impl Into<String>, height: i64) -> Self {
        Self {
            id,
            name: name.into(),
            height,
        }
    }
}

impl Record for Person {
    const ENTITY: &'static str = "Person";
    const FIELDS: &'static [FieldDescriptor<Self>] = &[
        FieldDescriptor::new("Id", ValueKind::Int, |p: &Person| {
            FieldValue::Int(p.id)
        }),
        FieldDescriptor::new("Name", ValueKind::Text, |p: &Person| {
            FieldValue::Text(p.name.clone())
        }),
        FieldDescriptor::new("Height", ValueKind::Int, |p: &Person| {
            FieldValue::Int(p.height)
        }),
    ];
}

/// `[(1, Bob, 170), (2, Amy, 170), (3, Cid, 160)]`
pub fn sample_people() -> Vec<Person> {
    vec![
        Person::new(1, "Bob", 170),
        Person::new(2, "Amy", 170),
        Person::new(3, "Cid", 160),
    ]
}
