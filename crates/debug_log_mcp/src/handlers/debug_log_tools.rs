use core::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use serde_json::{Value, json};

use crate::{
    abilities::{
        AbilityRegistry, Caller,
        debug_log::{CLEAR_LOG, LOG_INFO, READ_LOG, register_debug_log_abilities},
    },
    application::LogFileService,
    config::Config,
    domain::LogFileOperations,
    errors::{AbilityResult, DebugLogMcpError, McpResult, ToolResult},
    models::requests::ReadLogRequest,
};

/// Debug Log MCP Service
///
/// Exposes the debug-log abilities as MCP tools. Every tool call goes through
/// the ability registry, which checks the session's capabilities first.
#[derive(Clone)]
pub struct DebugLogService {
    log_file: PathBuf,
    chunk_size: usize,
    read_only: bool,
    caller: Caller,
    operations: Arc<dyn LogFileOperations>,
    registry: Arc<AbilityRegistry>,
    tool_router: ToolRouter<DebugLogService>,
}

impl DebugLogService {
    pub fn new(config: &Config) -> AbilityResult<Self> {
        let operations: Arc<dyn LogFileOperations> =
            Arc::new(LogFileService::new(config.chunk_size));

        let mut registry = AbilityRegistry::new();
        register_debug_log_abilities(&mut registry, &config.log_file, operations.clone())?;

        Ok(Self {
            log_file: config.log_file.clone(),
            chunk_size: config.chunk_size,
            read_only: config.read_only,
            caller: config.caller(),
            operations,
            registry: Arc::new(registry),
            tool_router: Self::tool_router(),
        })
    }

    fn create_resource_text(&self, uri: &str, name: &str) -> Resource {
        RawResource::new(uri, name.to_string()).no_annotation()
    }

    /// Dispatch an ability and turn its envelope into a tool result
    async fn call_ability(&self, name: &str, input: Value) -> ToolResult {
        let envelope = self.registry.dispatch(name, &self.caller, input).await?;
        let succeeded = envelope["success"].as_bool().unwrap_or(false);
        let text = serde_json::to_string_pretty(&envelope)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        let content = vec![Content::text(text)];
        if succeeded {
            Ok(CallToolResult::success(content))
        } else {
            Ok(CallToolResult::error(content))
        }
    }

    async fn generate_status_content(&self) -> String {
        let info = self.operations.inspect(&self.log_file).await;

        format!(
            r#"Debug Log MCP Server Status

Server: Running
Log File: {}
Exists: {}
Readable: {}
Writable: {}
Size: {} bytes
Mode: {}
Chunk Size: {} bytes
Abilities Registered: {}
Resources Available: 3"#,
            self.log_file.display(),
            info.exists,
            info.readable,
            info.writable,
            info.file_size,
            if self.read_only { "read-only" } else { "read-write" },
            self.chunk_size,
            self.registry.len()
        )
    }

    fn generate_help_content(&self) -> String {
        format!(
            r#"Debug Log MCP Server Help

TOOLS:
- read_log: Read the last lines of the debug log
  - lines: Number of lines from the end (optional, default 100, clamped to 1..=1000)
  - Example: {{"lines": 50}}

- clear_log: Truncate the debug log to zero bytes
  - No parameters required
  - Unavailable when the server runs with --read-only

- log_info: Report existence, size, and access of the debug log
  - No parameters required

RESOURCES:
- debug-log://status: Current server status and log file state
- debug-log://help: This help documentation
- debug-log://abilities: JSON catalog of registered abilities

LOG FILE: {}

RESPONSES:
Every tool returns a JSON object with "success" and "file_path".
On success the operation fields follow (content, file_size, lines_returned for read_log).
On failure an "error" message is returned and the tool result is flagged as an error.

LINE COUNTING:
lines_returned is the number of newline characters in content, plus one when
content does not end with a newline."#,
            self.log_file.display()
        )
    }

    fn generate_abilities_content(&self) -> McpResult<String> {
        serde_json::to_string_pretty(&self.registry.descriptors())
            .map_err(|e| McpError::internal_error(e.to_string(), None))
    }
}

#[tool_router]
impl DebugLogService {
    #[tool(
        description = "Read the last lines of the debug log file. Use the 'lines' parameter to choose how many lines to return from the end of the file (default 100, maximum 1000). Returns the content, the total file size in bytes, and the number of lines returned."
    )]
    async fn read_log(&self, Parameters(req): Parameters<ReadLogRequest>) -> ToolResult {
        self.call_ability(READ_LOG, json!({ "lines": req.lines() }))
            .await
    }

    #[tool(
        description = "Clear the debug log file by truncating it to zero bytes. Returns the size of the file before it was cleared."
    )]
    async fn clear_log(&self) -> ToolResult {
        self.call_ability(CLEAR_LOG, Value::Null).await
    }

    #[tool(
        description = "Report whether the debug log file exists, its size in bytes, and whether it can be read and cleared."
    )]
    async fn log_info(&self) -> ToolResult {
        self.call_ability(LOG_INFO, Value::Null).await
    }
}

#[tool_handler]
impl ServerHandler for DebugLogService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(format!(
                "Debug Log MCP Server. Tools: read_log, clear_log, log_info. Log file: {}. Resources: debug-log://status, debug-log://help, debug-log://abilities.",
                self.log_file.display()
            )),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: vec![
                self.create_resource_text("debug-log://status", "server-status"),
                self.create_resource_text("debug-log://help", "help-documentation"),
                self.create_resource_text("debug-log://abilities", "ability-catalog"),
            ],
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        match uri.as_str() {
            "debug-log://status" => {
                let status = self.generate_status_content().await;
                Ok(ReadResourceResult {
                    contents: vec![ResourceContents::text(status, uri)],
                })
            }
            "debug-log://help" => {
                let help = self.generate_help_content();
                Ok(ReadResourceResult {
                    contents: vec![ResourceContents::text(help, uri)],
                })
            }
            "debug-log://abilities" => {
                let abilities = self.generate_abilities_content()?;
                Ok(ReadResourceResult {
                    contents: vec![ResourceContents::text(abilities, uri)],
                })
            }
            _ => Err(DebugLogMcpError::ResourceNotFound {
                uri: uri.to_string(),
            }
            .into()),
        }
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        Ok(ListResourceTemplatesResult {
            next_cursor: None,
            resource_templates: Vec::new(),
        })
    }

    async fn initialize(
        &self,
        _request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<InitializeResult, McpError> {
        tracing::info!("Debug Log MCP Server initialized successfully");
        Ok(self.get_info())
    }
}

impl fmt::Debug for DebugLogService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugLogService")
            .field("log_file", &self.log_file)
            .field("read_only", &self.read_only)
            .finish()
    }
}
