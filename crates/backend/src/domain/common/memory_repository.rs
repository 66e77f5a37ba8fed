use async_trait::async_trait;
use chrono::{DateTime, Utc};
use contracts::domain::common::{NewRecord, RecordFields, RecordId, TrackedRecord};
use tokio::sync::RwLock;

use super::error::RepositoryError;
use super::repository::RecordRepository;

/// Process-local store, used by tests and `database.in_memory = true`
pub struct MemoryRecordRepository<F> {
    records: RwLock<Vec<TrackedRecord<F>>>,
}

impl<F: RecordFields> MemoryRecordRepository<F> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Drop a record, as another client deleting it behind our back would
    pub async fn remove(&self, id: &RecordId) -> bool {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| &r.id != id);
        records.len() != before
    }
}

impl<F: RecordFields> Default for MemoryRecordRepository<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<F: RecordFields> RecordRepository<F> for MemoryRecordRepository<F> {
    async fn list(&self) -> Result<Vec<TrackedRecord<F>>, RepositoryError> {
        Ok(self.records.read().await.clone())
    }

    async fn add(&self, record: NewRecord<F>) -> Result<TrackedRecord<F>, RepositoryError> {
        let record = record.into_tracked(RecordId::new_v4());
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        record: &TrackedRecord<F>,
        expected_updated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or(RepositoryError::NotFound(record.id))?;
        if slot.base.updated_at != expected_updated_at {
            return Err(RepositoryError::Conflict(record.id));
        }
        *slot = record.clone();
        Ok(())
    }

    async fn exists(&self, id: &RecordId) -> Result<bool, RepositoryError> {
        Ok(self.records.read().await.iter().any(|r| &r.id == id))
    }

    async fn get(&self, id: &RecordId) -> Result<Option<TrackedRecord<F>>, RepositoryError> {
        Ok(self.records.read().await.iter().find(|r| &r.id == id).cloned())
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.records.read().await.len())
    }
}
