use serde::{Deserialize, Serialize};

/// Current status of a tracked record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordStatus {
    Pending,
    Completed,
    Rejected,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Pending => "Pending",
            RecordStatus::Completed => "Completed",
            RecordStatus::Rejected => "Rejected",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "Pending" => Ok(RecordStatus::Pending),
            "Completed" => Ok(RecordStatus::Completed),
            "Rejected" => Ok(RecordStatus::Rejected),
            _ => Err(format!("Unknown record status: {}", s)),
        }
    }

    /// Completed and Rejected admit no further Edit/Reject/TimeOut
    pub fn is_terminal(&self) -> bool {
        matches!(self, RecordStatus::Completed | RecordStatus::Rejected)
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tag of a remarks-history entry.
///
/// `Edited` annotates an edit while the record stays in its current status;
/// it never becomes a [`RecordStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistoryStatus {
    Pending,
    Completed,
    Rejected,
    Edited,
}

impl HistoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryStatus::Pending => "Pending",
            HistoryStatus::Completed => "Completed",
            HistoryStatus::Rejected => "Rejected",
            HistoryStatus::Edited => "Edited",
        }
    }

    /// The record status this entry establishes, `None` for `Edited`
    pub fn record_status(&self) -> Option<RecordStatus> {
        match self {
            HistoryStatus::Pending => Some(RecordStatus::Pending),
            HistoryStatus::Completed => Some(RecordStatus::Completed),
            HistoryStatus::Rejected => Some(RecordStatus::Rejected),
            HistoryStatus::Edited => None,
        }
    }

    /// Entries with these tags must carry non-blank remarks
    pub fn requires_remarks(&self) -> bool {
        matches!(self, HistoryStatus::Completed | HistoryStatus::Rejected)
    }
}

impl From<RecordStatus> for HistoryStatus {
    fn from(status: RecordStatus) -> Self {
        match status {
            RecordStatus::Pending => HistoryStatus::Pending,
            RecordStatus::Completed => HistoryStatus::Completed,
            RecordStatus::Rejected => HistoryStatus::Rejected,
        }
    }
}

impl std::fmt::Display for HistoryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
