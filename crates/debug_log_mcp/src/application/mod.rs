pub mod log_file_service;
pub mod log_maintenance;
pub mod tail_reader;

pub use log_file_service::LogFileService;
