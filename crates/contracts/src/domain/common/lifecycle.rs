//! Record lifecycle state machine.
//!
//! ```text
//! Pending --(Edit)----> Pending
//! Pending --(Reject)--> Rejected   [terminal]
//! Pending --(TimeOut)-> Completed  [terminal]
//! ```
//!
//! Every transition is a pure function: it validates, then returns an updated
//! copy with one history entry appended. On error the input is untouched.
//! Persisting the result, and the freshness check before time-out, belong to
//! the caller.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::record::{NewRecord, RecordBase, TrackedRecord};
use super::record_fields::RecordFields;
use super::remarks_history::{HistoryEntry, RemarksHistory};
use super::status::{HistoryStatus, RecordStatus};

/// Remarks stored on an Edited entry when the caller supplies none
pub const EDIT_DEFAULT_REMARKS: &str = "Record updated";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Create,
    Edit,
    Reject,
    TimeOut,
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Transition::Create => "create",
            Transition::Edit => "edit",
            Transition::Reject => "reject",
            Transition::TimeOut => "time out",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// Missing remarks or mandatory fields
    #[error("{0}")]
    Validation(String),

    /// Transition attempted from a terminal status
    #[error("Cannot {transition} a record that is already {from}")]
    IllegalTransition {
        transition: Transition,
        from: RecordStatus,
    },
}

/// Everything Create needs besides the actor and the clock
#[derive(Debug, Clone)]
pub struct CreateInput<F> {
    pub fields: F,
    pub remarks: Option<String>,
    pub date_time_in: DateTime<Utc>,
    pub tracking_id: String,
}

fn entry(
    status: HistoryStatus,
    remarks: &str,
    actor: &str,
    now: DateTime<Utc>,
) -> Result<HistoryEntry, TransitionError> {
    HistoryEntry::new(status, remarks, actor, now).map_err(TransitionError::Validation)
}

fn required_remarks<'a>(remarks: &'a str, message: &str) -> Result<&'a str, TransitionError> {
    let trimmed = remarks.trim();
    if trimmed.is_empty() {
        return Err(TransitionError::Validation(message.to_string()));
    }
    Ok(trimmed)
}

fn ensure_open(status: RecordStatus, transition: Transition) -> Result<(), TransitionError> {
    if status.is_terminal() {
        return Err(TransitionError::IllegalTransition {
            transition,
            from: status,
        });
    }
    Ok(())
}

/// Create: new Pending record with a single Pending history entry
pub fn create<F: RecordFields>(
    input: CreateInput<F>,
    actor: &str,
    now: DateTime<Utc>,
) -> Result<NewRecord<F>, TransitionError> {
    input.fields.validate().map_err(TransitionError::Validation)?;
    if input.tracking_id.trim().is_empty() {
        return Err(TransitionError::Validation("Tracking ID is required".into()));
    }

    let remarks = input
        .remarks
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .unwrap_or_else(F::default_created_remarks);

    let mut history = RemarksHistory::new();
    history.append(entry(HistoryStatus::Pending, &remarks, actor, now)?);

    Ok(NewRecord {
        base: RecordBase {
            tracking_id: input.tracking_id,
            status: RecordStatus::Pending,
            remarks,
            remarks_history: history,
            date_time_in: input.date_time_in,
            date_time_out: None,
            time_out_remarks: None,
            created_at: now,
            updated_at: now,
        },
        fields: input.fields,
    })
}

/// Edit: replace the type fields and append an Edited entry; status is kept
pub fn edit<F: RecordFields>(
    record: &TrackedRecord<F>,
    fields: F,
    remarks: &str,
    actor: &str,
    now: DateTime<Utc>,
) -> Result<TrackedRecord<F>, TransitionError> {
    match record.base.status {
        RecordStatus::Pending => {}
        RecordStatus::Rejected if F::policy().allow_edit_when_rejected => {}
        from => {
            return Err(TransitionError::IllegalTransition {
                transition: Transition::Edit,
                from,
            })
        }
    }
    fields.validate().map_err(TransitionError::Validation)?;

    let remarks = match remarks.trim() {
        "" => EDIT_DEFAULT_REMARKS,
        r => r,
    };
    let edited = entry(HistoryStatus::Edited, remarks, actor, now)?;

    let mut updated = record.clone();
    updated.fields = fields;
    updated.base.remarks = remarks.to_string();
    updated.base.remarks_history.append(edited);
    updated.base.updated_at = now;
    Ok(updated)
}

/// Reject: terminal, remarks mandatory
pub fn reject<F: RecordFields>(
    record: &TrackedRecord<F>,
    remarks: &str,
    actor: &str,
    now: DateTime<Utc>,
) -> Result<TrackedRecord<F>, TransitionError> {
    let remarks = required_remarks(remarks, "Rejection remarks are required")?;
    ensure_open(record.base.status, Transition::Reject)?;
    let rejected = entry(HistoryStatus::Rejected, remarks, actor, now)?;

    let mut updated = record.clone();
    updated.base.status = RecordStatus::Rejected;
    updated.base.remarks = remarks.to_string();
    updated.base.remarks_history.append(rejected);
    updated.base.updated_at = now;
    Ok(updated)
}

/// TimeOut (complete): terminal, remarks mandatory, stamps `dateTimeOut`
pub fn time_out<F: RecordFields>(
    record: &TrackedRecord<F>,
    date_time_out: DateTime<Utc>,
    remarks: &str,
    actor: &str,
    now: DateTime<Utc>,
) -> Result<TrackedRecord<F>, TransitionError> {
    let remarks = required_remarks(remarks, "Time-out remarks are required")?;
    ensure_open(record.base.status, Transition::TimeOut)?;
    let completed = entry(HistoryStatus::Completed, remarks, actor, now)?;

    let mut updated = record.clone();
    updated.base.status = RecordStatus::Completed;
    updated.base.date_time_out = Some(date_time_out);
    updated.base.remarks = remarks.to_string();
    updated.base.time_out_remarks = Some(remarks.to_string());
    updated.base.remarks_history.append(completed);
    updated.base.updated_at = now;
    Ok(updated)
}
