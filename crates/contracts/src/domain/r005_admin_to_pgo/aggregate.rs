use serde::{Deserialize, Serialize};

use crate::domain::common::record_fields::require;
use crate::domain::common::{RecordFields, TrackedRecord};
use crate::enums::record_kind::RecordKind;

/// Document transmitted from the administrator's office to the PGO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminToPgoFields {
    pub particulars: String,
    pub document_type: String,
    #[serde(default)]
    pub office: Option<String>,
}

pub type AdminToPgoRecord = TrackedRecord<AdminToPgoFields>;

impl RecordFields for AdminToPgoFields {
    fn kind() -> RecordKind {
        RecordKind::AdminToPgo
    }

    fn validate(&self) -> Result<(), String> {
        require(&self.particulars, "Particulars")?;
        require(&self.document_type, "Document type")
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.particulars,
            self.document_type,
            self.office.as_deref().unwrap_or_default()
        )
    }
}
