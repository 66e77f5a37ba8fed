use axum::{routing::get, Router};
use contracts::domain::common::RecordFields;
use contracts::domain::r001_leave::aggregate::LeaveFields;
use contracts::domain::r002_letter::aggregate::LetterFields;
use contracts::domain::r003_locator_slip::aggregate::LocatorSlipFields;
use contracts::domain::r004_travel_order::aggregate::TravelOrderFields;
use contracts::domain::r005_admin_to_pgo::aggregate::AdminToPgoFields;

use crate::api::handlers::records;
use crate::domain::registry::RecordServices;

fn base_path<F: RecordFields>() -> String {
    format!("/api/records/{}", F::kind().code())
}

/// All application routes
pub fn configure_routes(services: RecordServices) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest(&base_path::<LeaveFields>(), records::router(services.leave))
        .nest(&base_path::<LetterFields>(), records::router(services.letter))
        .nest(
            &base_path::<LocatorSlipFields>(),
            records::router(services.locator_slip),
        )
        .nest(
            &base_path::<TravelOrderFields>(),
            records::router(services.travel_order),
        )
        .nest(
            &base_path::<AdminToPgoFields>(),
            records::router(services.admin_to_pgo),
        )
}
