use std::sync::Arc;

use chrono::{Local, Utc};
use contracts::domain::common::lifecycle::{self, CreateInput};
use contracts::domain::common::tracking_id;
use contracts::domain::common::{
    CreateRecordRequest, EditRecordRequest, RecordFields, RecordId, RecordListQuery,
    RejectRecordRequest, TimeOutRecordRequest, TrackedRecord,
};

use super::error::{RecordError, RepositoryError};
use super::repository::RecordRepository;

/// Create/list/edit/reject/time-out for one record type.
///
/// Each operation runs the pure transition first and persists the result;
/// the returned record is the stored one, so a caller only replaces its copy
/// after the repository accepted the write.
pub struct RecordService<F: RecordFields> {
    repository: Arc<dyn RecordRepository<F>>,
}

impl<F: RecordFields> RecordService<F> {
    pub fn new(repository: Arc<dyn RecordRepository<F>>) -> Self {
        Self { repository }
    }

    pub async fn create(
        &self,
        request: CreateRecordRequest<F>,
    ) -> Result<TrackedRecord<F>, RecordError> {
        let kind = F::kind();
        let CreateRecordRequest {
            fields,
            remarks,
            date_time_in,
            updated_by,
        } = request;

        let result: Result<TrackedRecord<F>, RecordError> = async {
            let now = Utc::now();
            let count = self.repository.count().await?;
            let tracking_id = tracking_id::generate_at(
                F::tracking_prefix(),
                count,
                &now.with_timezone(&Local),
            );
            let input = CreateInput {
                fields,
                remarks,
                date_time_in: date_time_in.unwrap_or(now),
                tracking_id,
            };
            let new_record = lifecycle::create(input, &updated_by, now)?;
            Ok(self.repository.add(new_record).await?)
        }
        .await;

        match &result {
            Ok(record) => tracing::info!(
                "{} {} created by {} (id {})",
                kind,
                record.tracking_id(),
                updated_by,
                record.id
            ),
            Err(e) => tracing::warn!("{} create by {} failed: {}", kind, updated_by, e),
        }
        result
    }

    /// Records matching the query, newest first
    pub async fn list(&self, query: &RecordListQuery) -> Result<Vec<TrackedRecord<F>>, RecordError> {
        let mut records: Vec<_> = self
            .repository
            .list()
            .await?
            .into_iter()
            .filter(|r| match query.status {
                Some(status) => r.status() == status,
                None => true,
            })
            .filter(|r| match query.search.as_deref() {
                Some(needle) => r.matches_search(needle),
                None => true,
            })
            .collect();
        records.sort_by(|a, b| b.base.created_at.cmp(&a.base.created_at));
        Ok(records)
    }

    pub async fn get(&self, id: &RecordId) -> Result<Option<TrackedRecord<F>>, RecordError> {
        Ok(self.repository.get(id).await?)
    }

    /// Edit the stored version of `record`; a copy that is out of date only
    /// supplies the id.
    pub async fn edit(
        &self,
        record: &TrackedRecord<F>,
        request: EditRecordRequest<F>,
    ) -> Result<TrackedRecord<F>, RecordError> {
        let EditRecordRequest {
            fields,
            remarks,
            updated_by,
        } = request;

        let result: Result<TrackedRecord<F>, RecordError> = async {
            let current = self
                .current(record)
                .await?
                .ok_or(RepositoryError::NotFound(record.id))?;
            let updated = lifecycle::edit(&current, fields, &remarks, &updated_by, Utc::now())?;
            self.store(&updated, &current).await?;
            Ok(updated)
        }
        .await;
        self.log_outcome("edited", record, &updated_by, &result);
        result
    }

    pub async fn reject(
        &self,
        record: &TrackedRecord<F>,
        request: RejectRecordRequest,
    ) -> Result<TrackedRecord<F>, RecordError> {
        let result: Result<TrackedRecord<F>, RecordError> = async {
            let current = self
                .current(record)
                .await?
                .ok_or(RepositoryError::NotFound(record.id))?;
            let updated =
                lifecycle::reject(&current, &request.remarks, &request.updated_by, Utc::now())?;
            self.store(&updated, &current).await?;
            Ok(updated)
        }
        .await;
        self.log_outcome("rejected", record, &request.updated_by, &result);
        result
    }

    /// Complete a record. A record the store no longer has is `StaleRecord`.
    pub async fn time_out(
        &self,
        record: &TrackedRecord<F>,
        request: TimeOutRecordRequest,
    ) -> Result<TrackedRecord<F>, RecordError> {
        let result: Result<TrackedRecord<F>, RecordError> = async {
            let current = self
                .current(record)
                .await?
                .ok_or(RecordError::StaleRecord(record.id))?;
            let now = Utc::now();
            let updated = lifecycle::time_out(
                &current,
                request.date_time_out.unwrap_or(now),
                &request.remarks,
                &request.updated_by,
                now,
            )?;
            self.store(&updated, &current).await?;
            Ok(updated)
        }
        .await;
        self.log_outcome("timed out", record, &request.updated_by, &result);
        result
    }

    async fn current(
        &self,
        record: &TrackedRecord<F>,
    ) -> Result<Option<TrackedRecord<F>>, RepositoryError> {
        self.repository.get(&record.id).await
    }

    /// Write `updated` only if the store still holds `read`
    async fn store(
        &self,
        updated: &TrackedRecord<F>,
        read: &TrackedRecord<F>,
    ) -> Result<(), RecordError> {
        match self.repository.update(updated, read.base.updated_at).await {
            Err(RepositoryError::Conflict(id)) => Err(RecordError::StaleRecord(id)),
            other => Ok(other?),
        }
    }

    fn log_outcome(
        &self,
        action: &str,
        record: &TrackedRecord<F>,
        actor: &str,
        result: &Result<TrackedRecord<F>, RecordError>,
    ) {
        match result {
            Ok(_) => tracing::info!(
                "{} {} {} by {}",
                F::kind(),
                record.tracking_id(),
                action,
                actor
            ),
            Err(RecordError::Repository(e)) => tracing::error!(
                "{} {} not {}: {}",
                F::kind(),
                record.tracking_id(),
                action,
                e
            ),
            Err(e) => tracing::warn!(
                "{} {} not {}: {}",
                F::kind(),
                record.tracking_id(),
                action,
                e
            ),
        }
    }
}
