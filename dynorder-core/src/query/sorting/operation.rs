//! Query operator catalog and ordering-operator selection
//!
//! Ordering operators come in two families: `order_by*` starts an
//! ordering, `then_by*` breaks ties of an existing one. An already ordered
//! query qualifies for both, so the family is never inferred from the query
//! alone when the caller leaves the clause position open.

use crate::error::{OrderError, Result};
use crate::query::types::{ClausePosition, SortOrder};
use tracing::debug;

/// Arity of every ordering operator: the source query and a key selector
pub const ORDERING_ARITY: usize = 2;

/// What a catalogued operator does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    Filter,
    OrderBy,
    OrderByDescending,
    ThenBy,
    ThenByDescending,
    Skip,
    Take,
}

impl OperatorKind {
    pub fn is_ordering(self) -> bool {
        self.position().is_some()
    }

    /// Clause position of an ordering operator
    pub fn position(self) -> Option<ClausePosition> {
        match self {
            OperatorKind::OrderBy | OperatorKind::OrderByDescending => {
                Some(ClausePosition::First)
            }
            OperatorKind::ThenBy | OperatorKind::ThenByDescending => {
                Some(ClausePosition::Subsequent)
            }
            _ => None,
        }
    }

    /// Direction of an ordering operator
    pub fn order(self) -> Option<SortOrder> {
        match self {
            OperatorKind::OrderBy | OperatorKind::ThenBy => {
                Some(SortOrder::Ascending)
            }
            OperatorKind::OrderByDescending | OperatorKind::ThenByDescending => {
                Some(SortOrder::Descending)
            }
            _ => None,
        }
    }
}

/// Name and argument shape of a query operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorSignature {
    pub name: &'static str,
    pub arity: usize,
    pub kind: OperatorKind,
}

const fn op(
    name: &'static str,
    arity: usize,
    kind: OperatorKind,
) -> OperatorSignature {
    OperatorSignature { name, arity, kind }
}

/// Every operator a [`Query`](crate::query::Query) supports
pub const QUERY_OPERATORS: &[OperatorSignature] = &[
    op("filter", 2, OperatorKind::Filter),
    op("order_by", ORDERING_ARITY, OperatorKind::OrderBy),
    op(
        "order_by_descending",
        ORDERING_ARITY,
        OperatorKind::OrderByDescending,
    ),
    op("then_by", ORDERING_ARITY, OperatorKind::ThenBy),
    op(
        "then_by_descending",
        ORDERING_ARITY,
        OperatorKind::ThenByDescending,
    ),
    op("skip", 2, OperatorKind::Skip),
    op("take", 2, OperatorKind::Take),
];

/// Find an operator by name and arity
pub fn find_operator(
    name: &str,
    arity: usize,
) -> Result<&'static OperatorSignature> {
    QUERY_OPERATORS
        .iter()
        .find(|signature| signature.name == name && signature.arity == arity)
        .ok_or_else(|| OrderError::OperationNotFound {
            name: name.to_string(),
            arity,
        })
}

/// Whether a query value already carries an ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryShape {
    Unordered,
    Ordered,
}

/// Pick the ordering operator for a clause
///
/// - `Some(First)` always starts a new ordering.
/// - `Some(Subsequent)` needs an ordered query.
/// - `None` is only accepted on an unordered query, where starting an
///   ordering is the single applicable choice.
pub fn select_ordering_operator(
    shape: QueryShape,
    position: Option<ClausePosition>,
    order: SortOrder,
    field: &str,
) -> Result<&'static OperatorSignature> {
    let position = match (position, shape) {
        (Some(ClausePosition::First), _) => ClausePosition::First,
        (Some(ClausePosition::Subsequent), QueryShape::Ordered) => {
            ClausePosition::Subsequent
        }
        (Some(ClausePosition::Subsequent), QueryShape::Unordered) => {
            return Err(OrderError::MissingPrimaryOrdering {
                field: field.to_string(),
            });
        }
        (None, QueryShape::Unordered) => ClausePosition::First,
        (None, QueryShape::Ordered) => {
            return Err(OrderError::AmbiguousOperation {
                field: field.to_string(),
            });
        }
    };

    let name = match (position, order) {
        (ClausePosition::First, SortOrder::Ascending) => "order_by",
        (ClausePosition::First, SortOrder::Descending) => "order_by_descending",
        (ClausePosition::Subsequent, SortOrder::Ascending) => "then_by",
        (ClausePosition::Subsequent, SortOrder::Descending) => {
            "then_by_descending"
        }
    };

    let signature = find_operator(name, ORDERING_ARITY)?;
    debug!(field, operator = signature.name, ?shape, "selected ordering operator");
    Ok(signature)
}
