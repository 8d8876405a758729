pub mod log_file_operations;

pub use log_file_operations::LogFileOperations;
