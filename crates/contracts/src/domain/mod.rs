pub mod common;
pub mod r001_leave;
pub mod r002_letter;
pub mod r003_locator_slip;
pub mod r004_travel_order;
pub mod r005_admin_to_pgo;
