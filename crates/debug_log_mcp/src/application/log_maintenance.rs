use std::fs::{self, File, OpenOptions};
use std::path::Path;

use crate::errors::LogFileResult;
use crate::models::responses::{ClearResult, LogFileInfo};
use crate::utils::fs::{Access, open_error, require_regular_file};

/// Empty the file at `path`, returning its size before truncation
pub fn truncate_file(path: &Path) -> LogFileResult<ClearResult> {
    let metadata = require_regular_file(path, Access::Write)?;
    let previous_size = metadata.len();

    OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|e| open_error(path, e, Access::Write))?;

    tracing::info!(path = %path.display(), previous_size, "Cleared debug log");
    Ok(ClearResult { previous_size })
}

/// Describe the file at `path` without modifying it
///
/// Readability and writability are probed by opening the file, so they reflect
/// the server's actual permissions rather than mode bits.
pub fn inspect_file(path: &Path) -> LogFileInfo {
    match fs::metadata(path) {
        Ok(metadata) => {
            let is_file = metadata.is_file();
            LogFileInfo {
                exists: true,
                is_file,
                readable: is_file && File::open(path).is_ok(),
                writable: is_file && OpenOptions::new().append(true).open(path).is_ok(),
                file_size: metadata.len(),
            }
        }
        Err(_) => LogFileInfo::missing(),
    }
}
