//! Ordering a query whose shape is only known at runtime
//!
//! [`apply_ordering`] is the dynamic counterpart of the typed
//! `order_by`/`then_by` methods: the field name, direction and clause
//! position all arrive as values.

use super::builder::{OrderedQuery, Query};
use super::sorting::{
    KeySelector, OperatorKind, QueryShape, select_ordering_operator,
};
use super::types::{ClausePosition, SortOrder};
use crate::error::{OrderError, Result};
use crate::record::Record;
use tracing::debug;

/// A query that may or may not carry an ordering yet
#[derive(Debug, Clone)]
pub enum DynamicQuery<T: Record> {
    Unordered(Query<T>),
    Ordered(OrderedQuery<T>),
}

impl<T: Record> DynamicQuery<T> {
    pub fn shape(&self) -> QueryShape {
        match self {
            DynamicQuery::Unordered(_) => QueryShape::Unordered,
            DynamicQuery::Ordered(_) => QueryShape::Ordered,
        }
    }

    fn query(&self) -> &Query<T> {
        match self {
            DynamicQuery::Unordered(query) => query,
            DynamicQuery::Ordered(ordered) => ordered.as_query(),
        }
    }

    pub fn into_query(self) -> Query<T> {
        match self {
            DynamicQuery::Unordered(query) => query,
            DynamicQuery::Ordered(ordered) => ordered.into_query(),
        }
    }
}

impl<T: Record> From<Query<T>> for DynamicQuery<T> {
    fn from(query: Query<T>) -> Self {
        DynamicQuery::Unordered(query)
    }
}

impl<T: Record> From<OrderedQuery<T>> for DynamicQuery<T> {
    fn from(ordered: OrderedQuery<T>) -> Self {
        DynamicQuery::Ordered(ordered)
    }
}

/// Order `query` by the field named `field`
///
/// `position` states whether the clause starts an ordering or breaks ties
/// of the existing one. Leaving it open is only accepted on an unordered
/// query; on an ordered query it fails with
/// [`OrderError::AmbiguousOperation`].
///
/// Nothing is fetched. The field is resolved before any operator is
/// selected, so an unknown name always reports
/// [`OrderError::FieldNotFound`].
pub fn apply_ordering<T: Record>(
    query: impl Into<DynamicQuery<T>>,
    field: &str,
    order: SortOrder,
    position: Option<ClausePosition>,
) -> Result<OrderedQuery<T>> {
    let query = query.into();
    let selector: KeySelector<T> = query.query().resolve_selector(field)?;

    let signature =
        select_ordering_operator(query.shape(), position, order, selector.field())?;
    let order = signature.kind.order().unwrap_or(order);

    let clause = query.query().context().registry().bind(selector, order)?;
    debug!(
        entity = T::ENTITY,
        requested = field,
        field = selector.field(),
        operator = signature.name,
        "applying dynamic ordering"
    );

    match (signature.kind, query) {
        (OperatorKind::OrderBy | OperatorKind::OrderByDescending, query) => {
            Ok(query.query().start_ordering(clause))
        }
        (
            OperatorKind::ThenBy | OperatorKind::ThenByDescending,
            DynamicQuery::Ordered(ordered),
        ) => ordered.push_tie_break(clause),
        (OperatorKind::ThenBy | OperatorKind::ThenByDescending, DynamicQuery::Unordered(_)) => {
            Err(OrderError::MissingPrimaryOrdering {
                field: selector.field().to_string(),
            })
        }
        (_, _) => Err(OrderError::OperationNotFound {
            name: signature.name.to_string(),
            arity: signature.arity,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::{Person, sample_people};

    fn ids(people: &[Person]) -> Vec<i64> {
        people.iter().map(|person| person.id).collect()
    }

    #[test]
    fn unordered_query_with_open_position_starts_ordering() {
        let query = Query::from_records(sample_people());
        let ordered =
            apply_ordering(query, "Height", SortOrder::Descending, None).unwrap();

        let people = ordered.apply_to(sample_people()).unwrap();
        assert_eq!(ids(&people), vec![1, 2, 3]);
    }

    #[test]
    fn ordered_query_with_open_position_is_ambiguous() {
        let ordered = Query::from_records(sample_people())
            .order_by("Height", SortOrder::Ascending)
            .unwrap();

        let err = apply_ordering(ordered, "Name", SortOrder::Ascending, None)
            .unwrap_err();
        assert!(matches!(err, OrderError::AmbiguousOperation { .. }));
    }

    #[test]
    fn explicit_positions_resolve_ordered_queries() {
        let ordered = Query::from_records(sample_people())
            .order_by("Height", SortOrder::Ascending)
            .unwrap();

        let tie_broken = apply_ordering(
            ordered.clone(),
            "Name",
            SortOrder::Ascending,
            Some(ClausePosition::Subsequent),
        )
        .unwrap();
        assert_eq!(tie_broken.clause_count(), 2);
        assert_eq!(
            ids(&tie_broken.apply_to(sample_people()).unwrap()),
            vec![3, 2, 1]
        );

        let restarted = apply_ordering(
            ordered,
            "Name",
            SortOrder::Descending,
            Some(ClausePosition::First),
        )
        .unwrap();
        assert_eq!(restarted.clause_count(), 1);
        assert_eq!(
            ids(&restarted.apply_to(sample_people()).unwrap()),
            vec![3, 1, 2]
        );
    }

    #[test]
    fn subsequent_position_needs_a_primary_ordering() {
        let err = apply_ordering(
            Query::from_records(sample_people()),
            "Name",
            SortOrder::Ascending,
            Some(ClausePosition::Subsequent),
        )
        .unwrap_err();
        assert!(matches!(err, OrderError::MissingPrimaryOrdering { .. }));
    }

    #[test]
    fn unknown_field_is_reported_before_operator_selection() {
        let ordered = Query::from_records(sample_people())
            .order_by("Height", SortOrder::Ascending)
            .unwrap();

        // Would be ambiguous, but the field is checked first
        let err = apply_ordering(ordered, "Weight", SortOrder::Ascending, None)
            .unwrap_err();
        assert!(matches!(
            err,
            OrderError::FieldNotFound { ref field, .. } if field == "Weight"
        ));
    }
}
