use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};

use crate::application::log_maintenance::{inspect_file, truncate_file};
use crate::application::tail_reader::TailReader;
use crate::domain::LogFileOperations;
use crate::errors::{LogFileError, LogFileResult};
use crate::models::responses::{ClearResult, LogFileInfo, TailResult};

/// `LogFileOperations` backed by the local filesystem
///
/// File access is blocking, so every call runs on tokio's blocking pool.
#[derive(Debug, Clone, Default)]
pub struct LogFileService {
    reader: TailReader,
}

impl LogFileService {
    pub fn new(chunk_size: usize) -> Self {
        Self {
            reader: TailReader::new(chunk_size),
        }
    }
}

fn join_error(path: &Path, error: tokio::task::JoinError) -> LogFileError {
    LogFileError::ReadFailed {
        path: path.display().to_string(),
        source: io::Error::other(error),
    }
}

#[async_trait]
impl LogFileOperations for LogFileService {
    async fn tail(&self, path: &Path, max_lines: usize) -> LogFileResult<TailResult> {
        let reader = self.reader;
        let owned: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || reader.tail(&owned, max_lines))
            .await
            .map_err(|e| join_error(path, e))?
    }

    async fn truncate(&self, path: &Path) -> LogFileResult<ClearResult> {
        let owned = path.to_path_buf();
        tokio::task::spawn_blocking(move || truncate_file(&owned))
            .await
            .map_err(|e| join_error(path, e))?
    }

    async fn inspect(&self, path: &Path) -> LogFileInfo {
        let owned = path.to_path_buf();
        match tokio::task::spawn_blocking(move || inspect_file(&owned)).await {
            Ok(info) => info,
            Err(e) => {
                tracing::warn!("Inspecting {} failed: {}", path.display(), e);
                LogFileInfo::missing()
            }
        }
    }
}
