//! Common types shared by every tracked record type

pub mod dto;
pub mod lifecycle;
pub mod record;
pub mod record_fields;
pub mod record_id;
pub mod remarks_history;
pub mod status;
pub mod tracking_id;

// Re-exports
pub use dto::{
    CreateRecordRequest, EditRecordRequest, RecordListQuery, RejectRecordRequest,
    TimeOutRecordRequest,
};
pub use lifecycle::{
    create, edit, reject, time_out, CreateInput, Transition, TransitionError, EDIT_DEFAULT_REMARKS,
};
pub use record::{NewRecord, RecordBase, TrackedRecord};
pub use record_fields::{LifecyclePolicy, RecordFields};
pub use record_id::RecordId;
pub use remarks_history::{HistoryEntry, RemarksHistory};
pub use status::{HistoryStatus, RecordStatus};
pub use tracking_id::TrackingId;
