use std::path::Path;

use serde::{Deserialize, Serialize};

/// Last lines of a log file together with its size at read time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TailResult {
    pub content: String,
    #[serde(rename = "file_size")]
    pub file_size_bytes: u64,
    pub lines_returned: usize,
}

impl TailResult {
    pub fn empty(file_size_bytes: u64) -> Self {
        Self {
            content: String::new(),
            file_size_bytes,
            lines_returned: 0,
        }
    }
}

/// Outcome of truncating a log file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearResult {
    /// Size of the file before it was emptied
    pub previous_size: u64,
}

/// Point-in-time description of a log file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogFileInfo {
    pub exists: bool,
    pub is_file: bool,
    pub readable: bool,
    pub writable: bool,
    pub file_size: u64,
}

impl LogFileInfo {
    pub fn missing() -> Self {
        Self {
            exists: false,
            is_file: false,
            readable: false,
            writable: false,
            file_size: 0,
        }
    }
}

/// JSON envelope returned by every debug-log ability
///
/// On success the payload fields are flattened next to `success`; on failure
/// only `error` is present.
#[derive(Debug, Clone, Serialize)]
pub struct LogResponse<T> {
    pub success: bool,
    pub file_path: String,
    #[serde(flatten)]
    pub payload: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> LogResponse<T> {
    pub fn ok(path: &Path, payload: T) -> Self {
        Self {
            success: true,
            file_path: path.display().to_string(),
            payload: Some(payload),
            error: None,
        }
    }

    pub fn failed(path: &Path, error: impl ToString) -> Self {
        Self {
            success: false,
            file_path: path.display().to_string(),
            payload: None,
            error: Some(error.to_string()),
        }
    }
}
