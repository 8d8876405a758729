use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::abilities::{
    Ability, AbilityDescriptor, AbilityRegistry, Capability, parse_input, to_output,
};
use crate::domain::LogFileOperations;
use crate::errors::AbilityResult;
use crate::models::requests::{ClearLogRequest, LogInfoRequest, ReadLogRequest};
use crate::models::responses::LogResponse;

pub const READ_LOG: &str = "debug-log/read-log";
pub const CLEAR_LOG: &str = "debug-log/clear-log";
pub const LOG_INFO: &str = "debug-log/log-info";

/// Register the read, clear and info abilities for `log_file`
pub fn register_debug_log_abilities(
    registry: &mut AbilityRegistry,
    log_file: &Path,
    operations: Arc<dyn LogFileOperations>,
) -> AbilityResult<()> {
    registry.register(Arc::new(ReadLogAbility::new(log_file, operations.clone())))?;
    registry.register(Arc::new(ClearLogAbility::new(log_file, operations.clone())))?;
    registry.register(Arc::new(LogInfoAbility::new(log_file, operations)))?;
    Ok(())
}

/// Returns the last lines of the debug log
pub struct ReadLogAbility {
    descriptor: AbilityDescriptor,
    log_file: PathBuf,
    operations: Arc<dyn LogFileOperations>,
}

impl ReadLogAbility {
    pub fn new(log_file: &Path, operations: Arc<dyn LogFileOperations>) -> Self {
        Self {
            descriptor: AbilityDescriptor::new::<ReadLogRequest>(
                READ_LOG,
                "Debug Log Reader",
                "Reads the last lines of the debug.log file.",
                Capability::ViewLog,
            ),
            log_file: log_file.to_path_buf(),
            operations,
        }
    }
}

#[async_trait]
impl Ability for ReadLogAbility {
    fn descriptor(&self) -> &AbilityDescriptor {
        &self.descriptor
    }

    async fn execute(&self, input: Value) -> AbilityResult<Value> {
        let request: ReadLogRequest = parse_input(READ_LOG, input)?;
        let response = match self
            .operations
            .tail(&self.log_file, request.line_count())
            .await
        {
            Ok(tail) => LogResponse::ok(&self.log_file, tail),
            Err(e) => {
                tracing::warn!("Reading debug log failed: {}", e);
                LogResponse::failed(&self.log_file, e)
            }
        };
        to_output(READ_LOG, &response)
    }
}

/// Truncates the debug log to zero bytes
pub struct ClearLogAbility {
    descriptor: AbilityDescriptor,
    log_file: PathBuf,
    operations: Arc<dyn LogFileOperations>,
}

impl ClearLogAbility {
    pub fn new(log_file: &Path, operations: Arc<dyn LogFileOperations>) -> Self {
        Self {
            descriptor: AbilityDescriptor::new::<ClearLogRequest>(
                CLEAR_LOG,
                "Debug Log Cleaner",
                "Clears the contents of the debug.log file.",
                Capability::ManageLog,
            ),
            log_file: log_file.to_path_buf(),
            operations,
        }
    }
}

#[async_trait]
impl Ability for ClearLogAbility {
    fn descriptor(&self) -> &AbilityDescriptor {
        &self.descriptor
    }

    async fn execute(&self, input: Value) -> AbilityResult<Value> {
        let _: ClearLogRequest = parse_input(CLEAR_LOG, input)?;
        let response = match self.operations.truncate(&self.log_file).await {
            Ok(cleared) => LogResponse::ok(&self.log_file, cleared),
            Err(e) => {
                tracing::warn!("Clearing debug log failed: {}", e);
                LogResponse::failed(&self.log_file, e)
            }
        };
        to_output(CLEAR_LOG, &response)
    }
}

/// Reports existence, size and access of the debug log
pub struct LogInfoAbility {
    descriptor: AbilityDescriptor,
    log_file: PathBuf,
    operations: Arc<dyn LogFileOperations>,
}

impl LogInfoAbility {
    pub fn new(log_file: &Path, operations: Arc<dyn LogFileOperations>) -> Self {
        Self {
            descriptor: AbilityDescriptor::new::<LogInfoRequest>(
                LOG_INFO,
                "Debug Log Info",
                "Reports whether the debug.log file exists, its size, and whether it can be read or cleared.",
                Capability::ViewLog,
            ),
            log_file: log_file.to_path_buf(),
            operations,
        }
    }
}

#[async_trait]
impl Ability for LogInfoAbility {
    fn descriptor(&self) -> &AbilityDescriptor {
        &self.descriptor
    }

    async fn execute(&self, input: Value) -> AbilityResult<Value> {
        let _: LogInfoRequest = parse_input(LOG_INFO, input)?;
        let info = self.operations.inspect(&self.log_file).await;
        to_output(LOG_INFO, &LogResponse::ok(&self.log_file, info))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::{TempDir, tempdir};

    use crate::abilities::Caller;
    use crate::application::LogFileService;
    use crate::errors::AbilityError;

    fn setup(content: Option<&str>) -> (TempDir, PathBuf, AbilityRegistry) {
        let dir = tempdir().unwrap();
        let log_file = dir.path().join("debug.log");
        if let Some(content) = content {
            std::fs::write(&log_file, content).unwrap();
        }
        let mut registry = AbilityRegistry::new();
        register_debug_log_abilities(&mut registry, &log_file, Arc::new(LogFileService::new(8)))
            .unwrap();
        (dir, log_file, registry)
    }

    fn admin() -> Caller {
        Caller::new([Capability::ViewLog, Capability::ManageLog])
    }

    #[tokio::test]
    async fn test_read_log_envelope() {
        let (_dir, log_file, registry) = setup(Some("a\nb\nc\n"));
        let output = registry
            .dispatch(READ_LOG, &admin(), json!({"lines": 2}))
            .await
            .unwrap();

        assert_eq!(output["success"], true);
        assert_eq!(output["content"], "b\nc\n");
        assert_eq!(output["lines_returned"], 2);
        assert_eq!(output["file_size"], 6);
        assert_eq!(output["file_path"], log_file.display().to_string());
    }

    #[tokio::test]
    async fn test_read_log_clamps_lines() {
        let (_dir, _log_file, registry) = setup(Some("a\nb\nc\n"));
        let output = registry
            .dispatch(READ_LOG, &admin(), json!({"lines": 0}))
            .await
            .unwrap();

        assert_eq!(output["content"], "c\n");
        assert_eq!(output["lines_returned"], 1);
    }

    #[tokio::test]
    async fn test_read_missing_log_is_failure_envelope() {
        let (_dir, log_file, registry) = setup(None);
        let output = registry
            .dispatch(READ_LOG, &admin(), Value::Null)
            .await
            .unwrap();

        assert_eq!(output["success"], false);
        assert_eq!(
            output["error"],
            format!("Debug log file does not exist at: {}", log_file.display())
        );
        assert!(output.get("content").is_none());
    }

    #[tokio::test]
    async fn test_clear_then_read() {
        let (_dir, _log_file, registry) = setup(Some("PHP Fatal error: boom\n"));

        let cleared = registry
            .dispatch(CLEAR_LOG, &admin(), Value::Null)
            .await
            .unwrap();
        assert_eq!(cleared["success"], true);
        assert_eq!(cleared["previous_size"], 22);

        let read = registry
            .dispatch(READ_LOG, &admin(), json!({}))
            .await
            .unwrap();
        assert_eq!(read["file_size"], 0);
        assert_eq!(read["lines_returned"], 0);
    }

    #[tokio::test]
    async fn test_read_only_caller_cannot_clear() {
        let (_dir, log_file, registry) = setup(Some("keep me\n"));
        let viewer = Caller::new([Capability::ViewLog]);

        let result = registry.dispatch(CLEAR_LOG, &viewer, Value::Null).await;
        assert!(matches!(result, Err(AbilityError::PermissionDenied { .. })));
        assert_eq!(std::fs::read_to_string(&log_file).unwrap(), "keep me\n");
    }

    #[tokio::test]
    async fn test_log_info() {
        let (_dir, _log_file, registry) = setup(Some("entry\n"));
        let output = registry
            .dispatch(LOG_INFO, &Caller::new([Capability::ViewLog]), Value::Null)
            .await
            .unwrap();

        assert_eq!(output["success"], true);
        assert_eq!(output["exists"], true);
        assert_eq!(output["file_size"], 6);
    }

    #[test]
    fn test_registered_names() {
        let (_dir, _log_file, registry) = setup(None);
        let names: Vec<&str> = registry
            .descriptors()
            .iter()
            .map(|d| d.name.as_str())
            .collect();

        assert_eq!(names, vec![CLEAR_LOG, LOG_INFO, READ_LOG]);
    }
}
