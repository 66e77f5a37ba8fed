use serde::{Deserialize, Serialize};

use crate::domain::common::record_fields::require;
use crate::domain::common::{RecordFields, TrackedRecord};
use crate::enums::record_kind::RecordKind;

/// Incoming letter logged at the receiving desk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterFields {
    pub sender: String,
    pub subject: String,
    #[serde(default)]
    pub addressee: Option<String>,
}

pub type LetterRecord = TrackedRecord<LetterFields>;

impl RecordFields for LetterFields {
    fn kind() -> RecordKind {
        RecordKind::Letter
    }

    fn validate(&self) -> Result<(), String> {
        require(&self.sender, "Sender")?;
        require(&self.subject, "Subject")
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.sender,
            self.subject,
            self.addressee.as_deref().unwrap_or_default()
        )
    }
}
