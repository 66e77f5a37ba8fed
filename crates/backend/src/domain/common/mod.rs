pub mod error;
pub mod memory_repository;
pub mod repository;
pub mod service;

pub use error::{RecordError, RepositoryError};
pub use memory_repository::MemoryRecordRepository;
pub use repository::RecordRepository;
pub use service::RecordService;
