use super::dynamic::{DynamicQuery, apply_ordering};
use super::sorting::{
    ChainedSort, FieldSort, KeyRegistry, KeySelector, OrderClause, SortKey,
    SortStrategy,
};
use super::source::{InMemorySource, RecordSource};
use super::types::{ClausePosition, OrderingRule, OrderingRules, SortOrder};
use crate::config::OrderingConfig;
use crate::error::{OrderError, Result};
use crate::record::Record;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Settings and key registry shared by every query derived from one root
pub struct QueryContext<T: Record> {
    config: OrderingConfig,
    registry: KeyRegistry<T>,
}

impl<T: Record> QueryContext<T> {
    pub fn new(config: OrderingConfig) -> Self {
        let registry = KeyRegistry::standard(&config);
        Self { config, registry }
    }

    /// Use a custom registry, e.g. one with extra key types
    pub fn with_registry(config: OrderingConfig, registry: KeyRegistry<T>) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &OrderingConfig {
        &self.config
    }

    pub fn registry(&self) -> &KeyRegistry<T> {
        &self.registry
    }
}

impl<T: Record> Default for QueryContext<T> {
    fn default() -> Self {
        Self::new(OrderingConfig::default())
    }
}

impl<T: Record> fmt::Debug for QueryContext<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryContext")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish()
    }
}

enum Stage<T> {
    Filter(Predicate<T>),
    Sort(ChainedSort<T>),
    Skip(usize),
    Take(usize),
}

impl<T> Clone for Stage<T> {
    fn clone(&self) -> Self {
        match self {
            Stage::Filter(predicate) => Stage::Filter(Arc::clone(predicate)),
            Stage::Sort(sort) => Stage::Sort(sort.clone()),
            Stage::Skip(count) => Stage::Skip(*count),
            Stage::Take(count) => Stage::Take(*count),
        }
    }
}

impl<T> fmt::Debug for Stage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Filter(_) => f.write_str("Filter"),
            Stage::Sort(sort) => fmt::Debug::fmt(sort, f),
            Stage::Skip(count) => write!(f, "Skip({count})"),
            Stage::Take(count) => write!(f, "Take({count})"),
        }
    }
}

/// Immutable, lazily evaluated query over records of type `T`
///
/// Every composition method returns a new query and leaves the receiver
/// untouched. The source is only read by [`Query::fetch`].
pub struct Query<T: Record> {
    source: Arc<dyn RecordSource<T>>,
    context: Arc<QueryContext<T>>,
    stages: Vec<Stage<T>>,
}

impl<T: Record> Query<T> {
    /// Query a source with the default configuration
    pub fn new(source: impl RecordSource<T> + 'static) -> Self {
        Self::from_source(Arc::new(source))
    }

    /// Query a shared source with the default configuration
    pub fn from_source(source: Arc<dyn RecordSource<T>>) -> Self {
        Self::with_context(source, Arc::new(QueryContext::default()))
    }

    /// Query in-memory records with the default configuration
    pub fn from_records(records: Vec<T>) -> Self {
        Self::new(InMemorySource::new(records))
    }

    /// Query a shared source with explicit settings
    pub fn with_config(
        source: Arc<dyn RecordSource<T>>,
        config: OrderingConfig,
    ) -> Self {
        Self::with_context(source, Arc::new(QueryContext::new(config)))
    }

    pub fn with_context(
        source: Arc<dyn RecordSource<T>>,
        context: Arc<QueryContext<T>>,
    ) -> Self {
        Self {
            source,
            context,
            stages: Vec::new(),
        }
    }

    pub fn context(&self) -> &QueryContext<T> {
        &self.context
    }

    fn with_stage(&self, stage: Stage<T>) -> Self {
        let mut stages = self.stages.clone();
        stages.push(stage);
        Self {
            source: Arc::clone(&self.source),
            context: Arc::clone(&self.context),
            stages,
        }
    }

    // === Composition ===

    /// Keep only records matching `predicate`
    pub fn filter(
        &self,
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Query<T> {
        self.with_stage(Stage::Filter(Arc::new(predicate)))
    }

    /// Drop the first `count` records
    pub fn skip(&self, count: usize) -> Query<T> {
        self.with_stage(Stage::Skip(count))
    }

    /// Keep at most `count` records
    pub fn take(&self, count: usize) -> Query<T> {
        self.with_stage(Stage::Take(count))
    }

    // === Ordering ===

    /// Order by a field named at runtime
    ///
    /// Fails with [`OrderError::FieldNotFound`] when `field` does not name a
    /// field of `T`. The returned query is not executed.
    pub fn order_by(&self, field: &str, order: SortOrder) -> Result<OrderedQuery<T>> {
        apply_ordering(
            DynamicQuery::Unordered(self.clone()),
            field,
            order,
            Some(ClausePosition::First),
        )
    }

    /// Order by a field using the configured default direction
    pub fn order_by_field(&self, field: &str) -> Result<OrderedQuery<T>> {
        self.order_by(field, self.context.config().default_order)
    }

    /// Order by a field with a key type stated by the caller
    ///
    /// Fails with [`OrderError::ValueKindMismatch`] when `K` does not match
    /// the field's declared kind.
    pub fn order_by_key<K: SortKey>(
        &self,
        field: &str,
        order: SortOrder,
    ) -> Result<OrderedQuery<T>> {
        let clause = self.typed_clause::<K>(field, order)?;
        Ok(self.start_ordering(clause))
    }

    /// Apply a rule list: the first rule orders, later rules break ties
    ///
    /// Rules without a direction use the configured `default_order`.
    pub fn order_by_rules(&self, rules: &OrderingRules) -> Result<OrderedQuery<T>> {
        if rules.is_empty() {
            return Err(OrderError::EmptyOrdering);
        }
        self.context.config().check_clause_count(rules.len())?;

        let mut current = DynamicQuery::Unordered(self.clone());
        for (position, rule) in rules.positioned() {
            let order = rule.order_or(self.context.config().default_order);
            let ordered = apply_ordering(current, &rule.field, order, Some(position))?;
            current = DynamicQuery::Ordered(ordered);
        }

        match current {
            DynamicQuery::Ordered(ordered) => Ok(ordered),
            DynamicQuery::Unordered(_) => Err(OrderError::EmptyOrdering),
        }
    }

    pub(crate) fn resolve_selector(&self, field: &str) -> Result<KeySelector<T>> {
        let descriptor = T::field(field, self.context.config().field_matching)?;
        Ok(KeySelector::new(descriptor))
    }

    fn typed_clause<K: SortKey>(
        &self,
        field: &str,
        order: SortOrder,
    ) -> Result<OrderClause<T>> {
        let typed = self.resolve_selector(field)?.typed::<K>()?;
        Ok(Arc::new(FieldSort::new(typed, order)))
    }

    pub(crate) fn start_ordering(&self, clause: OrderClause<T>) -> OrderedQuery<T> {
        debug!(
            entity = T::ENTITY,
            field = clause.field(),
            kind = %clause.key_kind(),
            order = %clause.order(),
            "starting ordering"
        );
        let mut query = self.clone();
        // A trailing sort is replaced, not kept as a hidden tie-break
        if matches!(query.stages.last(), Some(Stage::Sort(_))) {
            query.stages.pop();
        }
        query.stages.push(Stage::Sort(ChainedSort::new(clause)));
        OrderedQuery { query }
    }

    // === Execution ===

    /// Rules of the most recent ordering, primary first
    pub fn ordering_summary(&self) -> Vec<OrderingRule> {
        self.stages
            .iter()
            .rev()
            .find_map(|stage| match stage {
                Stage::Sort(sort) => Some(sort.rules()),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// Evaluate the pipeline over `records`
    pub fn apply_to(&self, mut records: Vec<T>) -> Result<Vec<T>> {
        for stage in &self.stages {
            match stage {
                Stage::Filter(predicate) => records.retain(|record| predicate(record)),
                Stage::Sort(sort) => sort.sort(&mut records)?,
                Stage::Skip(count) => {
                    let count = (*count).min(records.len());
                    records.drain(..count);
                }
                Stage::Take(count) => records.truncate(*count),
            }
            trace!(entity = T::ENTITY, ?stage, remaining = records.len(), "applied stage");
        }
        Ok(records)
    }

    /// Load from the source and evaluate the pipeline
    pub async fn fetch(&self) -> Result<Vec<T>> {
        let records = self.source.load().await?;
        debug!(
            entity = T::ENTITY,
            loaded = records.len(),
            stages = self.stages.len(),
            "executing query"
        );
        self.apply_to(records)
    }
}

impl<T: Record> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            context: Arc::clone(&self.context),
            stages: self.stages.clone(),
        }
    }
}

impl<T: Record> fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("entity", &T::ENTITY)
            .field("stages", &self.stages)
            .finish()
    }
}

/// A query whose last stage is an ordering
///
/// Only ordered queries offer tie-break (`then_by`) operations. Filtering
/// or paging an ordered query yields a plain [`Query`] again.
pub struct OrderedQuery<T: Record> {
    query: Query<T>,
}

impl<T: Record> OrderedQuery<T> {
    /// Break ties of the current ordering by another runtime-named field
    pub fn then_by(&self, field: &str, order: SortOrder) -> Result<OrderedQuery<T>> {
        apply_ordering(
            DynamicQuery::Ordered(self.clone()),
            field,
            order,
            Some(ClausePosition::Subsequent),
        )
    }

    /// Break ties using the configured default direction
    pub fn then_by_field(&self, field: &str) -> Result<OrderedQuery<T>> {
        self.then_by(field, self.query.context.config().default_order)
    }

    /// Break ties by a field with a key type stated by the caller
    pub fn then_by_key<K: SortKey>(
        &self,
        field: &str,
        order: SortOrder,
    ) -> Result<OrderedQuery<T>> {
        let clause = self.query.typed_clause::<K>(field, order)?;
        self.push_tie_break(clause)
    }

    /// Discard the tie-break chain and start a new ordering
    pub fn order_by(&self, field: &str, order: SortOrder) -> Result<OrderedQuery<T>> {
        self.query.order_by(field, order)
    }

    /// Restart ordering using the configured default direction
    pub fn order_by_field(&self, field: &str) -> Result<OrderedQuery<T>> {
        self.query.order_by_field(field)
    }

    pub fn filter(
        &self,
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Query<T> {
        self.query.filter(predicate)
    }

    pub fn skip(&self, count: usize) -> Query<T> {
        self.query.skip(count)
    }

    pub fn take(&self, count: usize) -> Query<T> {
        self.query.take(count)
    }

    pub(crate) fn push_tie_break(&self, clause: OrderClause<T>) -> Result<OrderedQuery<T>> {
        let mut query = self.query.clone();
        let Some(Stage::Sort(sort)) = query.stages.pop() else {
            // Only constructed with a trailing sort stage
            return Err(OrderError::MissingPrimaryOrdering {
                field: clause.field().to_string(),
            });
        };

        query.context.config().check_clause_count(sort.len() + 1)?;
        debug!(
            entity = T::ENTITY,
            field = clause.field(),
            kind = %clause.key_kind(),
            order = %clause.order(),
            position = sort.len(),
            "adding tie-break ordering"
        );
        query.stages.push(Stage::Sort(sort.then_by(clause)));
        Ok(OrderedQuery { query })
    }

    /// Number of clauses in the current ordering
    pub fn clause_count(&self) -> usize {
        match self.query.stages.last() {
            Some(Stage::Sort(sort)) => sort.len(),
            _ => 0,
        }
    }

    pub fn ordering_summary(&self) -> Vec<OrderingRule> {
        self.query.ordering_summary()
    }

    pub fn apply_to(&self, records: Vec<T>) -> Result<Vec<T>> {
        self.query.apply_to(records)
    }

    pub async fn fetch(&self) -> Result<Vec<T>> {
        self.query.fetch().await
    }

    pub fn as_query(&self) -> &Query<T> {
        &self.query
    }

    pub fn into_query(self) -> Query<T> {
        self.query
    }
}

impl<T: Record> Clone for OrderedQuery<T> {
    fn clone(&self) -> Self {
        Self {
            query: self.query.clone(),
        }
    }
}

impl<T: Record> fmt::Debug for OrderedQuery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OrderedQuery").field(&self.query).finish()
    }
}

impl<T: Record> From<OrderedQuery<T>> for Query<T> {
    fn from(ordered: OrderedQuery<T>) -> Self {
        ordered.query
    }
}

impl OrderingRules {
    /// Apply these rules to `query`
    pub fn apply<T: Record>(&self, query: &Query<T>) -> Result<OrderedQuery<T>> {
        query.order_by_rules(self)
    }
}
