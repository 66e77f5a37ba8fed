use serde::{Deserialize, Serialize};

use crate::domain::common::record_fields::require;
use crate::domain::common::{RecordFields, TrackedRecord};
use crate::enums::record_kind::RecordKind;

/// Leave application routed for approval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveFields {
    pub employee_name: String,
    pub designation: String,
    /// Vacation, Sick, Special Privilege, ...
    pub leave_type: String,
    /// Free text as written on the form, e.g. "March 10-12, 2025"
    pub inclusive_dates: String,
}

pub type LeaveRecord = TrackedRecord<LeaveFields>;

impl RecordFields for LeaveFields {
    fn kind() -> RecordKind {
        RecordKind::Leave
    }

    fn validate(&self) -> Result<(), String> {
        require(&self.employee_name, "Employee name")?;
        require(&self.designation, "Designation")?;
        require(&self.leave_type, "Leave type")?;
        require(&self.inclusive_dates, "Inclusive dates")
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.employee_name, self.designation, self.leave_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_reports_first_missing_field() {
        let mut fields = LeaveFields {
            employee_name: "Juan Dela Cruz".into(),
            designation: "Clerk II".into(),
            leave_type: String::new(),
            inclusive_dates: "May 2, 2025".into(),
        };
        assert_eq!(fields.validate(), Err("Leave type is required".into()));
        fields.leave_type = "Sick".into();
        assert!(fields.validate().is_ok());
        assert_eq!(LeaveFields::tracking_prefix(), "LV");
        assert_eq!(LeaveFields::default_created_remarks(), "Leave record created");
    }
}
