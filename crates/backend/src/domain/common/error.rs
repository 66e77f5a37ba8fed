use contracts::domain::common::{RecordId, RecordStatus, Transition, TransitionError};
use thiserror::Error;

/// Failures reported by a record repository
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No record with this id in the store
    #[error("record not found: {0}")]
    NotFound(RecordId),

    /// The stored record changed since it was read
    #[error("record {0} was modified by another writer")]
    Conflict(RecordId),

    /// A stored document could not be encoded or decoded
    #[error("record serialization error: {0}")]
    Serialization(String),

    /// Connection, query or other backend failure
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl From<serde_json::Error> for RepositoryError {
    fn from(e: serde_json::Error) -> Self {
        RepositoryError::Serialization(e.to_string())
    }
}

impl From<sea_orm::DbErr> for RepositoryError {
    fn from(e: sea_orm::DbErr) -> Self {
        RepositoryError::Backend(e.to_string())
    }
}

/// Everything a record operation can fail with
#[derive(Debug, Error)]
pub enum RecordError {
    /// Missing remarks or mandatory fields; nothing was changed
    #[error("{0}")]
    Validation(String),

    /// Transition from a terminal status; nothing was changed
    #[error("Cannot {transition} a record that is already {from}")]
    IllegalTransition {
        transition: Transition,
        from: RecordStatus,
    },

    /// The record the operation started from was changed by another writer
    /// or is gone from the store. Refresh the list instead of retrying.
    #[error("Record {0} has changed or no longer exists; refresh and try again")]
    StaleRecord(RecordId),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<TransitionError> for RecordError {
    fn from(e: TransitionError) -> Self {
        match e {
            TransitionError::Validation(message) => RecordError::Validation(message),
            TransitionError::IllegalTransition { transition, from } => {
                RecordError::IllegalTransition { transition, from }
            }
        }
    }
}
