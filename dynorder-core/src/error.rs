use crate::record::ValueKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrderError {
    #[error("unknown field '{field}' on {entity}")]
    FieldNotFound { entity: &'static str, field: String },

    #[error("field '{field}' on {entity} matches several fields: {candidates:?}")]
    AmbiguousField {
        entity: &'static str,
        field: String,
        candidates: Vec<&'static str>,
    },

    #[error(
        "cannot choose between first and subsequent ordering for '{field}': query is already ordered"
    )]
    AmbiguousOperation { field: String },

    #[error("'{field}' is a tie-break ordering but the query has no primary ordering")]
    MissingPrimaryOrdering { field: String },

    #[error("no query operator named '{name}' takes {arity} arguments")]
    OperationNotFound { name: String, arity: usize },

    #[error("no sort key registered for {kind} values")]
    KeyTypeNotRegistered { kind: ValueKind },

    #[error("field '{field}' holds {found} values, expected {expected}")]
    ValueKindMismatch {
        field: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("ordering rule list is empty")]
    EmptyOrdering,

    #[error("{count} ordering clauses exceed the limit of {max}")]
    TooManyClauses { count: usize, max: usize },

    #[error("invalid ordering rule: {0}")]
    InvalidRule(String),

    #[error("invalid ordering configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Record source error: {0}")]
    Source(String),
}

pub type Result<T> = std::result::Result<T, OrderError>;
