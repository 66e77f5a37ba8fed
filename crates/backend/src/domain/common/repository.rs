use async_trait::async_trait;
use chrono::{DateTime, Utc};
use contracts::domain::common::{NewRecord, RecordFields, RecordId, TrackedRecord};

use super::error::RepositoryError;

/// Persistence contract for one record type.
///
/// `update` replaces the whole stored document and must be atomic per
/// record. It is conditional on the stored `updatedAt`, so a write based on
/// an outdated read never lands.
#[async_trait]
pub trait RecordRepository<F: RecordFields>: Send + Sync {
    /// All records of this type, in insertion order
    async fn list(&self) -> Result<Vec<TrackedRecord<F>>, RepositoryError>;

    /// Store a new record, assigning its id
    async fn add(&self, record: NewRecord<F>) -> Result<TrackedRecord<F>, RepositoryError>;

    /// Replace a stored record whose `updatedAt` is still `expected_updated_at`.
    /// Fails with `NotFound` if the id is absent and `Conflict` if the stored
    /// record has moved on.
    async fn update(
        &self,
        record: &TrackedRecord<F>,
        expected_updated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError>;

    async fn exists(&self, id: &RecordId) -> Result<bool, RepositoryError>;

    async fn get(&self, id: &RecordId) -> Result<Option<TrackedRecord<F>>, RepositoryError> {
        Ok(self.list().await?.into_iter().find(|r| &r.id == id))
    }

    /// Number of stored records; feeds the tracking ID sequence
    async fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.list().await?.len())
    }
}
