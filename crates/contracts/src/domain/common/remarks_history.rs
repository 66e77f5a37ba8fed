use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::{HistoryStatus, RecordStatus};

/// One status event in a record's audit trail.
///
/// Fields are private: an entry cannot be changed once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    remarks: String,
    status: HistoryStatus,
    timestamp: DateTime<Utc>,
    updated_by: String,
}

impl HistoryEntry {
    /// Build an entry, rejecting blank remarks for Completed/Rejected and a blank actor
    pub fn new(
        status: HistoryStatus,
        remarks: impl Into<String>,
        updated_by: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, String> {
        let remarks = remarks.into();
        let updated_by = updated_by.into();
        if status.requires_remarks() && remarks.trim().is_empty() {
            return Err(format!("{} entry requires remarks", status));
        }
        if updated_by.trim().is_empty() {
            return Err("History entry requires an actor".into());
        }
        Ok(Self {
            remarks,
            status,
            timestamp,
            updated_by,
        })
    }

    pub fn remarks(&self) -> &str {
        &self.remarks
    }

    pub fn status(&self) -> HistoryStatus {
        self.status
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn updated_by(&self) -> &str {
        &self.updated_by
    }
}

/// Append-only, chronologically ordered remarks history
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemarksHistory(Vec<HistoryEntry>);

impl RemarksHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: HistoryEntry) {
        self.0.push(entry);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.0.last()
    }

    /// Last entry that is not an `Edited` annotation
    pub fn last_status_entry(&self) -> Option<&HistoryEntry> {
        self.0
            .iter()
            .rev()
            .find(|e| e.status != HistoryStatus::Edited)
    }

    /// Record status obtained by replaying the history
    pub fn replay_status(&self) -> Option<RecordStatus> {
        self.last_status_entry()
            .and_then(|e| e.status.record_status())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a RemarksHistory {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
