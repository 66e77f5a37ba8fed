use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use contracts::domain::common::{
    CreateRecordRequest, EditRecordRequest, RecordFields, RecordId, RecordListQuery,
    RejectRecordRequest, TimeOutRecordRequest, TrackedRecord,
};
use serde_json::json;

use crate::domain::common::{RecordError, RecordService, RepositoryError};

/// Error body `{"error": "..."}` with a status derived from the failure kind
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn not_found(id: &RecordId) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: format!("Record {} not found", id),
        }
    }
}

impl From<RecordError> for ApiError {
    fn from(e: RecordError) -> Self {
        let status = match &e {
            RecordError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RecordError::IllegalTransition { .. } => StatusCode::CONFLICT,
            RecordError::StaleRecord(_) => StatusCode::CONFLICT,
            RecordError::Repository(RepositoryError::NotFound(_)) => StatusCode::NOT_FOUND,
            RecordError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

/// Malformed or incomplete bodies answer in the same `{"error": ...}` shape
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

type Service<F> = State<Arc<RecordService<F>>>;

/// Routes for one record type, to be nested under its base path
pub fn router<F: RecordFields>(service: Arc<RecordService<F>>) -> Router {
    Router::new()
        .route("/", get(list::<F>).post(create::<F>))
        .route("/:id", get(get_by_id::<F>).put(edit::<F>))
        .route("/:id/reject", post(reject::<F>))
        .route("/:id/time-out", post(time_out::<F>))
        .with_state(service)
}

fn parse_id(id: &str) -> Result<RecordId, ApiError> {
    RecordId::from_string(id).map_err(ApiError::bad_request)
}

async fn load<F: RecordFields>(
    service: &RecordService<F>,
    id: &str,
) -> Result<TrackedRecord<F>, ApiError> {
    let id = parse_id(id)?;
    service
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(&id))
}

/// GET /api/records/{kind}?search=&status=
pub async fn list<F: RecordFields>(
    State(service): Service<F>,
    query: Result<Query<RecordListQuery>, QueryRejection>,
) -> Result<Json<Vec<TrackedRecord<F>>>, ApiError> {
    let Query(query) = query?;
    Ok(Json(service.list(&query).await?))
}

/// POST /api/records/{kind}
pub async fn create<F: RecordFields>(
    State(service): Service<F>,
    request: Result<Json<CreateRecordRequest<F>>, JsonRejection>,
) -> Result<(StatusCode, Json<TrackedRecord<F>>), ApiError> {
    let Json(request) = request?;
    let record = service.create(request).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/records/{kind}/:id
pub async fn get_by_id<F: RecordFields>(
    State(service): Service<F>,
    Path(id): Path<String>,
) -> Result<Json<TrackedRecord<F>>, ApiError> {
    Ok(Json(load(&service, &id).await?))
}

/// PUT /api/records/{kind}/:id
pub async fn edit<F: RecordFields>(
    State(service): Service<F>,
    Path(id): Path<String>,
    request: Result<Json<EditRecordRequest<F>>, JsonRejection>,
) -> Result<Json<TrackedRecord<F>>, ApiError> {
    let Json(request) = request?;
    let record = load(&service, &id).await?;
    Ok(Json(service.edit(&record, request).await?))
}

/// POST /api/records/{kind}/:id/reject
pub async fn reject<F: RecordFields>(
    State(service): Service<F>,
    Path(id): Path<String>,
    request: Result<Json<RejectRecordRequest>, JsonRejection>,
) -> Result<Json<TrackedRecord<F>>, ApiError> {
    let Json(request) = request?;
    let record = load(&service, &id).await?;
    Ok(Json(service.reject(&record, request).await?))
}

/// POST /api/records/{kind}/:id/time-out
pub async fn time_out<F: RecordFields>(
    State(service): Service<F>,
    Path(id): Path<String>,
    request: Result<Json<TimeOutRecordRequest>, JsonRejection>,
) -> Result<Json<TrackedRecord<F>>, ApiError> {
    let Json(request) = request?;
    let record = load(&service, &id).await?;
    Ok(Json(service.time_out(&record, request).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::{MemoryRecordRepository, RecordRepository};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use chrono::{DateTime, Utc};
    use contracts::domain::common::NewRecord;
    use axum::http::{header, Method, Request};
    use contracts::domain::r002_letter::aggregate::LetterFields;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        let repo: Arc<MemoryRecordRepository<LetterFields>> = Arc::new(MemoryRecordRepository::new());
        Router::new().nest("/api/records/letter", router(Arc::new(RecordService::new(repo))))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create_letter(app: &Router) -> Value {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/records/letter",
            Some(json!({
                "sender": "Municipal Mayor",
                "subject": "Request for road clearing",
                "updatedBy": "receiving.clerk"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body
    }

    #[tokio::test]
    async fn test_create_and_view() {
        let app = app();
        let created = create_letter(&app).await;
        assert_eq!(created["status"], "Pending");
        assert_eq!(created["remarks"], "Letter record created");
        assert!(created["trackingId"].as_str().unwrap().starts_with("(LTR) "));
        assert_eq!(created["remarksHistory"].as_array().unwrap().len(), 1);

        let id = created["id"].as_str().unwrap();
        let (status, viewed) = send(&app, Method::GET, &format!("/api/records/letter/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(viewed, created);
    }

    #[tokio::test]
    async fn test_create_missing_field_is_unprocessable() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/records/letter",
            Some(json!({ "sender": "Mayor", "subject": " ", "updatedBy": "clerk" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "Subject is required");
    }

    #[tokio::test]
    async fn test_reject_then_time_out_conflicts() {
        let app = app();
        let created = create_letter(&app).await;
        let id = created["id"].as_str().unwrap();

        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/api/records/letter/{}/reject", id),
            Some(json!({ "remarks": "", "updatedBy": "head" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "Rejection remarks are required");

        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/api/records/letter/{}/reject", id),
            Some(json!({ "remarks": "wrong office", "updatedBy": "head" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "Rejected");

        let (status, _) = send(
            &app,
            Method::POST,
            &format!("/api/records/letter/{}/time-out", id),
            Some(json!({ "remarks": "released", "updatedBy": "clerk" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_edit_and_list_with_filters() {
        let app = app();
        let created = create_letter(&app).await;
        let id = created["id"].as_str().unwrap();

        let (status, edited) = send(
            &app,
            Method::PUT,
            &format!("/api/records/letter/{}", id),
            Some(json!({
                "sender": "Municipal Mayor",
                "subject": "Request for road clearing (revised)",
                "remarks": "subject corrected",
                "updatedBy": "clerk"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(edited["remarksHistory"][1]["status"], "Edited");
        assert_eq!(edited["status"], "Pending");

        let (_, pending) = send(&app, Method::GET, "/api/records/letter?status=Pending&search=revised", None).await;
        assert_eq!(pending.as_array().unwrap().len(), 1);

        let (_, completed) = send(&app, Method::GET, "/api/records/letter?status=Completed", None).await;
        assert!(completed.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_and_malformed_ids() {
        let app = app();
        let (status, _) = send(
            &app,
            Method::GET,
            &format!("/api/records/letter/{}", RecordId::new_v4()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::GET, "/api/records/letter/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_body_field_is_json_error() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/records/letter",
            Some(json!({ "sender": "Mayor", "updatedBy": "clerk" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().contains("missing field `subject`"));
    }

    #[tokio::test]
    async fn test_bad_status_filter_is_json_error() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/api/records/letter?status=Lost", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    /// Reads from memory; every update fails with the configured error
    struct RefusingUpdates {
        inner: MemoryRecordRepository<LetterFields>,
        error: fn(RecordId) -> RepositoryError,
    }

    #[async_trait]
    impl RecordRepository<LetterFields> for RefusingUpdates {
        async fn list(&self) -> Result<Vec<TrackedRecord<LetterFields>>, RepositoryError> {
            self.inner.list().await
        }

        async fn add(
            &self,
            record: NewRecord<LetterFields>,
        ) -> Result<TrackedRecord<LetterFields>, RepositoryError> {
            self.inner.add(record).await
        }

        async fn update(
            &self,
            record: &TrackedRecord<LetterFields>,
            _expected_updated_at: DateTime<Utc>,
        ) -> Result<(), RepositoryError> {
            Err((self.error)(record.id))
        }

        async fn exists(&self, id: &RecordId) -> Result<bool, RepositoryError> {
            self.inner.exists(id).await
        }
    }

    async fn reject_with_failing_update(error: fn(RecordId) -> RepositoryError) -> (StatusCode, Value) {
        let repo = Arc::new(RefusingUpdates {
            inner: MemoryRecordRepository::new(),
            error,
        });
        let app = Router::new().nest("/api/records/letter", router(Arc::new(RecordService::new(repo))));
        let created = create_letter(&app).await;
        let id = created["id"].as_str().unwrap();
        send(
            &app,
            Method::POST,
            &format!("/api/records/letter/{}/reject", id),
            Some(json!({ "remarks": "wrong office", "updatedBy": "head" })),
        )
        .await
    }

    #[tokio::test]
    async fn test_concurrent_change_is_conflict() {
        let (status, body) = reject_with_failing_update(RepositoryError::Conflict).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].as_str().unwrap().contains("refresh and try again"));
    }

    #[tokio::test]
    async fn test_record_vanishing_on_write_is_not_found() {
        let (status, body) = reject_with_failing_update(RepositoryError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().starts_with("record not found"));
    }
}
