//! Storage trait for AQ records

use async_trait::async_trait;

use crate::models::{AqKey, AqRecord, ListQuery};

/// Storage error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// Constraint violation reported by a non-SQL backend
    #[error("constraint violation: {0}")]
    Constraint(String),
}

impl StoreError {
    pub(crate) fn not_found(key: &AqKey) -> Self {
        Self::NotFound {
            resource: "aq",
            id: key.as_str().to_owned(),
        }
    }
}

/// AQ record storage (testable)
///
/// Write paths ignore any client-supplied `date_added`/`date_updated` and
/// return the record as stored.
#[async_trait]
pub trait AqStore: Send + Sync {
    /// Records matching `query`, ordered by key ascending.
    async fn list(&self, query: &ListQuery) -> Result<Vec<AqRecord>, StoreError>;

    /// Record with exactly this key, or `StoreError::NotFound`.
    async fn get(&self, key: &AqKey) -> Result<AqRecord, StoreError>;

    /// Insert a new record. Both timestamps are set to now.
    async fn create(&self, record: &AqRecord) -> Result<AqRecord, StoreError>;

    /// Replace every client-writable column of an existing record.
    /// `date_updated` is set to now, `date_added` is left alone.
    async fn update(&self, record: &AqRecord) -> Result<AqRecord, StoreError>;

    /// Delete by key, returning the number of rows removed (0 is not an error).
    async fn delete(&self, key: &AqKey) -> Result<u64, StoreError>;

    /// Cheap liveness check.
    async fn ping(&self) -> Result<(), StoreError>;
}
