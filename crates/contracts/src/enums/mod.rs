pub mod record_kind;
