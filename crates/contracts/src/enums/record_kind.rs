use serde::{Deserialize, Serialize};

/// Record types routed through the office
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Leave,
    Letter,
    LocatorSlip,
    TravelOrder,
    AdminToPgo,
}

impl RecordKind {
    /// Prefix printed inside the tracking ID, e.g. "(LV) 2025/03/07-005"
    pub fn prefix(&self) -> &'static str {
        match self {
            RecordKind::Leave => "LV",
            RecordKind::Letter => "LTR",
            RecordKind::LocatorSlip => "LS",
            RecordKind::TravelOrder => "TO",
            RecordKind::AdminToPgo => "ATP",
        }
    }

    /// URL segment and storage discriminator
    pub fn code(&self) -> &'static str {
        match self {
            RecordKind::Leave => "leave",
            RecordKind::Letter => "letter",
            RecordKind::LocatorSlip => "locator-slip",
            RecordKind::TravelOrder => "travel-order",
            RecordKind::AdminToPgo => "admin-to-pgo",
        }
    }

    /// Human readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            RecordKind::Leave => "Leave",
            RecordKind::Letter => "Letter",
            RecordKind::LocatorSlip => "Locator Slip",
            RecordKind::TravelOrder => "Travel Order",
            RecordKind::AdminToPgo => "Admin to PGO",
        }
    }

    pub fn all() -> Vec<RecordKind> {
        vec![
            RecordKind::Leave,
            RecordKind::Letter,
            RecordKind::LocatorSlip,
            RecordKind::TravelOrder,
            RecordKind::AdminToPgo,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "leave" => Some(RecordKind::Leave),
            "letter" => Some(RecordKind::Letter),
            "locator-slip" => Some(RecordKind::LocatorSlip),
            "travel-order" => Some(RecordKind::TravelOrder),
            "admin-to-pgo" => Some(RecordKind::AdminToPgo),
            _ => None,
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
