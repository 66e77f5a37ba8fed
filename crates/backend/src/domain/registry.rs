use std::sync::Arc;

use contracts::domain::common::RecordFields;
use contracts::domain::r001_leave::aggregate::LeaveFields;
use contracts::domain::r002_letter::aggregate::LetterFields;
use contracts::domain::r003_locator_slip::aggregate::LocatorSlipFields;
use contracts::domain::r004_travel_order::aggregate::TravelOrderFields;
use contracts::domain::r005_admin_to_pgo::aggregate::AdminToPgoFields;
use sea_orm::DatabaseConnection;

use super::common::{MemoryRecordRepository, RecordRepository, RecordService};
use crate::shared::data::record_storage::SqliteRecordRepository;

/// One service per record type, all sharing a storage backend
#[derive(Clone)]
pub struct RecordServices {
    pub leave: Arc<RecordService<LeaveFields>>,
    pub letter: Arc<RecordService<LetterFields>>,
    pub locator_slip: Arc<RecordService<LocatorSlipFields>>,
    pub travel_order: Arc<RecordService<TravelOrderFields>>,
    pub admin_to_pgo: Arc<RecordService<AdminToPgoFields>>,
}

fn service<F: RecordFields>(repository: Arc<dyn RecordRepository<F>>) -> Arc<RecordService<F>> {
    Arc::new(RecordService::new(repository))
}

impl RecordServices {
    pub fn in_memory() -> Self {
        fn memory<F: RecordFields>() -> Arc<RecordService<F>> {
            service(Arc::new(MemoryRecordRepository::<F>::new()))
        }
        Self {
            leave: memory(),
            letter: memory(),
            locator_slip: memory(),
            travel_order: memory(),
            admin_to_pgo: memory(),
        }
    }

    pub fn sqlite(conn: &DatabaseConnection) -> Self {
        fn sqlite<F: RecordFields>(conn: &DatabaseConnection) -> Arc<RecordService<F>> {
            service(Arc::new(SqliteRecordRepository::<F>::new(conn.clone())))
        }
        Self {
            leave: sqlite(conn),
            letter: sqlite(conn),
            locator_slip: sqlite(conn),
            travel_order: sqlite(conn),
            admin_to_pgo: sqlite(conn),
        }
    }
}
