use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record_fields::RecordFields;
use super::record_id::RecordId;
use super::remarks_history::RemarksHistory;
use super::status::RecordStatus;

/// Envelope fields every tracked record carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordBase {
    /// "(PREFIX) YYYY/MM/DD-NNN", immutable after creation
    pub tracking_id: String,
    pub status: RecordStatus,
    /// Always equal to the remarks of the latest history entry
    pub remarks: String,
    pub remarks_history: RemarksHistory,
    pub date_time_in: DateTime<Utc>,
    /// Set only by the time-out transition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time_out: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_out_remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Record built by Create, not yet persisted (no id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "F: RecordFields")]
pub struct NewRecord<F> {
    #[serde(flatten)]
    pub base: RecordBase,
    #[serde(flatten)]
    pub fields: F,
}

impl<F: RecordFields> NewRecord<F> {
    /// Attach the id assigned by the repository
    pub fn into_tracked(self, id: RecordId) -> TrackedRecord<F> {
        TrackedRecord {
            id,
            base: self.base,
            fields: self.fields,
        }
    }
}

/// Persisted record: id + envelope + type fields, one flat JSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "F: RecordFields")]
pub struct TrackedRecord<F> {
    pub id: RecordId,
    #[serde(flatten)]
    pub base: RecordBase,
    #[serde(flatten)]
    pub fields: F,
}

impl<F: RecordFields> TrackedRecord<F> {
    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }

    pub fn status(&self) -> RecordStatus {
        self.base.status
    }

    pub fn tracking_id(&self) -> &str {
        &self.base.tracking_id
    }

    /// Case-insensitive match over tracking ID, remarks and type fields
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.base.tracking_id.to_lowercase().contains(&needle)
            || self.base.remarks.to_lowercase().contains(&needle)
            || self.fields.search_text().to_lowercase().contains(&needle)
    }
}
