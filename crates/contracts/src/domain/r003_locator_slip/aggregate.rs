use serde::{Deserialize, Serialize};

use crate::domain::common::record_fields::require;
use crate::domain::common::{RecordFields, TrackedRecord};
use crate::enums::record_kind::RecordKind;

/// Locator slip for an employee leaving the office during work hours
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocatorSlipFields {
    pub employee_name: String,
    #[serde(default)]
    pub designation: String,
    pub destination: String,
    pub purpose: String,
}

pub type LocatorSlipRecord = TrackedRecord<LocatorSlipFields>;

impl RecordFields for LocatorSlipFields {
    fn kind() -> RecordKind {
        RecordKind::LocatorSlip
    }

    fn validate(&self) -> Result<(), String> {
        require(&self.employee_name, "Employee name")?;
        require(&self.destination, "Destination")?;
        require(&self.purpose, "Purpose")
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.employee_name, self.designation, self.destination, self.purpose
        )
    }
}
