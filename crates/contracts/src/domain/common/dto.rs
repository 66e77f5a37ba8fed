use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record_fields::RecordFields;
use super::status::RecordStatus;

/// Body of POST /api/records/{kind}
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "F: RecordFields")]
pub struct CreateRecordRequest<F> {
    #[serde(flatten)]
    pub fields: F,
    #[serde(default)]
    pub remarks: Option<String>,
    /// Defaults to the time of the request
    #[serde(default)]
    pub date_time_in: Option<DateTime<Utc>>,
    pub updated_by: String,
}

/// Body of PUT /api/records/{kind}/{id}
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "F: RecordFields")]
pub struct EditRecordRequest<F> {
    #[serde(flatten)]
    pub fields: F,
    #[serde(default)]
    pub remarks: String,
    pub updated_by: String,
}

/// Body of POST /api/records/{kind}/{id}/reject
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectRecordRequest {
    #[serde(default)]
    pub remarks: String,
    pub updated_by: String,
}

/// Body of POST /api/records/{kind}/{id}/time-out
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOutRecordRequest {
    /// Defaults to the time of the request
    #[serde(default)]
    pub date_time_out: Option<DateTime<Utc>>,
    #[serde(default)]
    pub remarks: String,
    pub updated_by: String,
}

/// Query of GET /api/records/{kind}
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordListQuery {
    pub search: Option<String>,
    pub status: Option<RecordStatus>,
}
