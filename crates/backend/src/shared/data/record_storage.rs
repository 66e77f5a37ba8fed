use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use contracts::domain::common::{NewRecord, RecordFields, RecordId, TrackedRecord};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select, Set};
use serde::{Deserialize, Serialize};

use crate::domain::common::{RecordRepository, RepositoryError};

/// One row per record; `document` holds the flat JSON form of the record
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tracked_record")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub kind: String,
    pub tracking_id: String,
    pub status: String,
    pub document: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    fn into_record<F: RecordFields>(self) -> Result<TrackedRecord<F>, RepositoryError> {
        Ok(serde_json::from_str(&self.document)?)
    }
}

/// SQLite-backed repository for one record type
pub struct SqliteRecordRepository<F> {
    conn: DatabaseConnection,
    _fields: PhantomData<fn() -> F>,
}

impl<F: RecordFields> SqliteRecordRepository<F> {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self {
            conn,
            _fields: PhantomData,
        }
    }

    fn kind_code() -> &'static str {
        F::kind().code()
    }

    fn find_one(id: &RecordId) -> Select<Entity> {
        Entity::find_by_id(id.as_string()).filter(Column::Kind.eq(Self::kind_code()))
    }
}

#[async_trait]
impl<F: RecordFields> RecordRepository<F> for SqliteRecordRepository<F> {
    async fn list(&self) -> Result<Vec<TrackedRecord<F>>, RepositoryError> {
        let models = Entity::find()
            .filter(Column::Kind.eq(Self::kind_code()))
            .order_by_asc(Column::CreatedAt)
            .all(&self.conn)
            .await?;
        models.into_iter().map(Model::into_record).collect()
    }

    async fn add(&self, record: NewRecord<F>) -> Result<TrackedRecord<F>, RepositoryError> {
        let record = record.into_tracked(RecordId::new_v4());
        let active = ActiveModel {
            id: Set(record.to_string_id()),
            kind: Set(Self::kind_code().to_string()),
            tracking_id: Set(record.base.tracking_id.clone()),
            status: Set(record.base.status.as_str().to_string()),
            document: Set(serde_json::to_string(&record)?),
            created_at: Set(record.base.created_at.to_rfc3339()),
            updated_at: Set(record.base.updated_at.to_rfc3339()),
        };
        Entity::insert(active).exec(&self.conn).await?;

        tracing::debug!(
            "Stored {} {} as {}",
            F::kind(),
            record.base.tracking_id,
            record.id
        );
        Ok(record)
    }

    async fn update(
        &self,
        record: &TrackedRecord<F>,
        expected_updated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        // Single conditional UPDATE, so a record is never half written and an
        // outdated read never overwrites a newer version
        let result = Entity::update_many()
            .col_expr(Column::Status, Expr::value(record.base.status.as_str()))
            .col_expr(Column::Document, Expr::value(serde_json::to_string(record)?))
            .col_expr(
                Column::UpdatedAt,
                Expr::value(record.base.updated_at.to_rfc3339()),
            )
            .filter(Column::Id.eq(record.to_string_id()))
            .filter(Column::Kind.eq(Self::kind_code()))
            .filter(Column::UpdatedAt.eq(expected_updated_at.to_rfc3339()))
            .exec(&self.conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(if self.exists(&record.id).await? {
                RepositoryError::Conflict(record.id)
            } else {
                RepositoryError::NotFound(record.id)
            });
        }
        Ok(())
    }

    async fn exists(&self, id: &RecordId) -> Result<bool, RepositoryError> {
        Ok(Self::find_one(id).one(&self.conn).await?.is_some())
    }

    async fn get(&self, id: &RecordId) -> Result<Option<TrackedRecord<F>>, RepositoryError> {
        Self::find_one(id)
            .one(&self.conn)
            .await?
            .map(Model::into_record)
            .transpose()
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        let count = Entity::find()
            .filter(Column::Kind.eq(Self::kind_code()))
            .count(&self.conn)
            .await?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use chrono::{TimeZone, Utc};
    use contracts::domain::common::{create, reject, CreateInput, RecordStatus};
    use contracts::domain::r001_leave::aggregate::LeaveFields;
    use contracts::domain::r003_locator_slip::aggregate::LocatorSlipFields;

    fn new_leave(name: &str) -> NewRecord<LeaveFields> {
        let now = Utc.with_ymd_and_hms(2025, 3, 7, 8, 0, 0).unwrap();
        let input = CreateInput {
            fields: LeaveFields {
                employee_name: name.into(),
                designation: "Clerk II".into(),
                leave_type: "Sick".into(),
                inclusive_dates: "March 7, 2025".into(),
            },
            remarks: None,
            date_time_in: now,
            tracking_id: "(LV) 2025/03/07-001".into(),
        };
        create(input, "clerk", now).unwrap()
    }

    #[tokio::test]
    async fn test_add_get_update_round_trip() {
        let conn = connect_in_memory().await.unwrap();
        let repo = SqliteRecordRepository::<LeaveFields>::new(conn);

        let stored = repo.add(new_leave("Maria Santos")).await.unwrap();
        assert!(repo.exists(&stored.id).await.unwrap());
        assert_eq!(repo.get(&stored.id).await.unwrap(), Some(stored.clone()));

        let rejected = reject(&stored, "no balance", "head", Utc::now()).unwrap();
        repo.update(&rejected, stored.base.updated_at).await.unwrap();

        let reloaded = repo.get(&stored.id).await.unwrap().unwrap();
        assert_eq!(reloaded.status(), RecordStatus::Rejected);
        assert_eq!(reloaded.base.remarks_history.len(), 2);
        assert_eq!(reloaded, rejected);
    }

    #[tokio::test]
    async fn test_kinds_are_isolated() {
        let conn = connect_in_memory().await.unwrap();
        let leaves = SqliteRecordRepository::<LeaveFields>::new(conn.clone());
        let slips = SqliteRecordRepository::<LocatorSlipFields>::new(conn);

        let leave = leaves.add(new_leave("Maria Santos")).await.unwrap();
        leaves.add(new_leave("Jose Rizal")).await.unwrap();

        assert_eq!(leaves.count().await.unwrap(), 2);
        assert_eq!(slips.count().await.unwrap(), 0);
        assert!(slips.list().await.unwrap().is_empty());
        assert!(!slips.exists(&leave.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_missing_record_is_not_found() {
        let conn = connect_in_memory().await.unwrap();
        let repo = SqliteRecordRepository::<LeaveFields>::new(conn);
        let orphan = new_leave("Nobody").into_tracked(RecordId::new_v4());
        assert!(matches!(
            repo.update(&orphan, orphan.base.updated_at).await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_from_outdated_read_conflicts() {
        let conn = connect_in_memory().await.unwrap();
        let repo = SqliteRecordRepository::<LeaveFields>::new(conn);
        let stored = repo.add(new_leave("Maria Santos")).await.unwrap();

        let rejected = reject(&stored, "no balance", "head", Utc::now()).unwrap();
        repo.update(&rejected, stored.base.updated_at).await.unwrap();

        let late = reject(&stored, "duplicate", "other.head", Utc::now()).unwrap();
        assert!(matches!(
            repo.update(&late, stored.base.updated_at).await,
            Err(RepositoryError::Conflict(id)) if id == stored.id
        ));
        assert_eq!(repo.get(&stored.id).await.unwrap(), Some(rejected));
    }

    #[tokio::test]
    async fn test_document_is_flat_json() {
        let conn = connect_in_memory().await.unwrap();
        let repo = SqliteRecordRepository::<LeaveFields>::new(conn.clone());
        let stored = repo.add(new_leave("Maria Santos")).await.unwrap();

        let model = Entity::find_by_id(stored.to_string_id())
            .one(&conn)
            .await
            .unwrap()
            .unwrap();
        let doc: serde_json::Value = serde_json::from_str(&model.document).unwrap();
        assert_eq!(doc["trackingId"], "(LV) 2025/03/07-001");
        assert_eq!(doc["employeeName"], "Maria Santos");
        assert_eq!(doc["status"], "Pending");
        assert_eq!(doc["remarksHistory"][0]["remarks"], "Leave record created");
        assert_eq!(doc["remarksHistory"][0]["updatedBy"], "clerk");
        assert!(doc.get("dateTimeOut").is_none());
        assert_eq!(model.status, "Pending");
    }
}
