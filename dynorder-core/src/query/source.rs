//! Record sources queries are evaluated against
//!
//! A source is only touched when a query is fetched; building and composing
//! queries never calls [`RecordSource::load`].

use crate::error::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// Backing store for a query
#[async_trait]
pub trait RecordSource<T>: Send + Sync {
    /// Load every record in source order
    async fn load(&self) -> Result<Vec<T>>;
}

/// Records held in memory, counting how often they are loaded
pub struct InMemorySource<T> {
    records: Vec<T>,
    loads: AtomicUsize,
}

impl<T> InMemorySource<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records,
            loads: AtomicUsize::new(0),
        }
    }

    /// Number of completed loads
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl<T: Clone + Send + Sync + 'static> RecordSource<T> for InMemorySource<T> {
    async fn load(&self) -> Result<Vec<T>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.clone())
    }
}

impl<T> fmt::Debug for InMemorySource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemorySource")
            .field("records", &self.records.len())
            .field("loads", &self.load_count())
            .finish()
    }
}

/// A JSON array of records stored in a file
pub struct JsonFileSource<T> {
    path: PathBuf,
    _record: PhantomData<fn() -> T>,
}

impl<T> JsonFileSource<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl<T: DeserializeOwned + Send + 'static> RecordSource<T> for JsonFileSource<T> {
    async fn load(&self) -> Result<Vec<T>> {
        let bytes = tokio::fs::read(&self.path).await?;
        let records: Vec<T> = serde_json::from_slice(&bytes)?;
        debug!(
            path = %self.path.display(),
            records = records.len(),
            "loaded records from JSON file"
        );
        Ok(records)
    }
}

impl<T> fmt::Debug for JsonFileSource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonFileSource")
            .field("path", &self.path)
            .finish()
    }
}
