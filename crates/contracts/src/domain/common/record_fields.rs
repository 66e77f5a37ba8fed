use serde::{de::DeserializeOwned, Serialize};

use crate::enums::record_kind::RecordKind;

/// Per-type knobs of the lifecycle state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LifecyclePolicy {
    /// Allow Edit on a Rejected record. The status stays Rejected either way.
    pub allow_edit_when_rejected: bool,
}

/// Type-specific payload carried by a tracked record.
///
/// Implemented once per record type; the lifecycle and the repositories are
/// generic over it.
pub trait RecordFields:
    Clone + std::fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Record type
    fn kind() -> RecordKind;

    /// Mandatory create/edit fields
    fn validate(&self) -> Result<(), String>;

    /// Text matched by list search, in addition to tracking ID and remarks
    fn search_text(&self) -> String;

    fn policy() -> LifecyclePolicy {
        LifecyclePolicy::default()
    }

    /// Remarks used when Create receives none (e.g. "Leave record created")
    fn default_created_remarks() -> String {
        format!("{} record created", Self::kind().display_name())
    }

    fn tracking_prefix() -> &'static str {
        Self::kind().prefix()
    }
}

/// Shared helper for `validate` implementations
pub fn require(value: &str, label: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", label));
    }
    Ok(())
}
