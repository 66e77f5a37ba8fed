use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::record_fields::require;
use crate::domain::common::{RecordFields, TrackedRecord};
use crate::enums::record_kind::RecordKind;

/// Travel order request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelOrderFields {
    pub employee_name: String,
    #[serde(default)]
    pub designation: String,
    pub destination: String,
    pub purpose: String,
    pub departure_date: NaiveDate,
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
}

pub type TravelOrderRecord = TrackedRecord<TravelOrderFields>;

impl RecordFields for TravelOrderFields {
    fn kind() -> RecordKind {
        RecordKind::TravelOrder
    }

    fn validate(&self) -> Result<(), String> {
        require(&self.employee_name, "Employee name")?;
        require(&self.destination, "Destination")?;
        require(&self.purpose, "Purpose")?;
        if let Some(return_date) = self.return_date {
            if return_date < self.departure_date {
                return Err("Return date cannot be before departure date".into());
            }
        }
        Ok(())
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.employee_name, self.designation, self.destination, self.purpose
        )
    }
}
