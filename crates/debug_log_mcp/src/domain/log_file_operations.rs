use async_trait::async_trait;
use std::path::Path;

use crate::{
    errors::LogFileResult,
    models::responses::{ClearResult, LogFileInfo, TailResult},
};

/// Domain trait for operations on an externally managed log file
///
/// Implementations hold no state between calls: every call observes the file
/// as it is at that moment.
#[async_trait]
pub trait LogFileOperations: Send + Sync {
    /// Read the last lines of a file
    ///
    /// # Arguments
    /// * `path` - The log file to read
    /// * `max_lines` - Maximum number of lines to return, already clamped by the caller
    ///
    /// # Returns
    /// * `Ok(TailResult)` - The trailing content, file size and line count
    /// * `Err(LogFileError)` - If the file is missing, unreadable or a read fails
    async fn tail(&self, path: &Path, max_lines: usize) -> LogFileResult<TailResult>;

    /// Truncate the file to zero bytes and report its former size
    async fn truncate(&self, path: &Path) -> LogFileResult<ClearResult>;

    /// Describe existence, size and access of the file
    async fn inspect(&self, path: &Path) -> LogFileInfo;
}
