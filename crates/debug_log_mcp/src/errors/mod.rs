use rmcp::serde_json::json;

pub type McpError = rmcp::ErrorData;

/// Result type for startup operations
pub type DebugLogMcpResult<T> = Result<T, DebugLogMcpError>;

/// Result type for log file operations
pub type LogFileResult<T> = Result<T, LogFileError>;

/// Result type for ability dispatch
pub type AbilityResult<T> = Result<T, AbilityError>;

/// Type alias for MCP results
pub type McpResult<T> = Result<T, McpError>;

/// Type alias for tool results
pub type ToolResult = McpResult<rmcp::model::CallToolResult>;

// Error codes
const ERROR_UNKNOWN_ABILITY: &str = "unknown_ability";
const ERROR_DUPLICATE_ABILITY: &str = "duplicate_ability";
const ERROR_PERMISSION_DENIED: &str = "permission_denied";
const ERROR_INVALID_INPUT: &str = "invalid_input";
const ERROR_SERIALIZATION: &str = "serialization_failed";
const ERROR_RESOURCE_NOT_FOUND: &str = "resource_not_found";

/// Startup and server-level errors
#[derive(thiserror::Error, Debug)]
pub enum DebugLogMcpError {
    #[error("Directory does not exist: {path}")]
    DirectoryNotFound { path: String },
    #[error("Configuration validation failed: {message}")]
    InvalidConfig { message: String },
    /// Logging initialization failed
    #[error("Logging initialization failed: {0}")]
    LoggingInitialization(String),
    #[error("Resource not found: {uri}")]
    ResourceNotFound { uri: String },
}

impl From<DebugLogMcpError> for McpError {
    fn from(err: DebugLogMcpError) -> Self {
        match err {
            DebugLogMcpError::ResourceNotFound { uri } => McpError::resource_not_found(
                ERROR_RESOURCE_NOT_FOUND,
                Some(json!({
                    "uri": uri,
                    "available_resources": crate::handlers::AVAILABLE_RESOURCES
                })),
            ),
            other => McpError::internal_error(other.to_string(), None),
        }
    }
}

/// Failures of the tail reader and its companion operations.
///
/// None of these are retried; the caller decides how to report them.
#[derive(thiserror::Error, Debug)]
pub enum LogFileError {
    #[error("Debug log file does not exist at: {path}")]
    NotFound { path: String },
    #[error("Debug log file is not readable: {path}")]
    NotReadable { path: String },
    #[error("Debug log file is not writable: {path}")]
    NotWritable { path: String },
    #[error("Debug log path is not a regular file: {path}")]
    NotAFile { path: String },
    /// The pre-checks passed but opening still failed (e.g. the file was removed in between)
    #[error("Unable to open file: {path}")]
    OpenFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read debug log {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by the ability registry and dispatcher
#[derive(thiserror::Error, Debug)]
pub enum AbilityError {
    #[error("Unknown ability: {name}")]
    UnknownAbility { name: String },
    #[error("Ability already registered: {name}")]
    DuplicateAbility { name: String },
    #[error("Caller lacks capability '{capability}' required by {name}")]
    PermissionDenied { name: String, capability: String },
    #[error("Invalid input for {name}: {message}")]
    InvalidInput { name: String, message: String },
    #[error("Failed to serialize output of {name}: {message}")]
    Serialization { name: String, message: String },
}

impl From<AbilityError> for McpError {
    fn from(err: AbilityError) -> Self {
        match err {
            AbilityError::UnknownAbility { name } => {
                McpError::invalid_request(ERROR_UNKNOWN_ABILITY, Some(json!({"ability": name})))
            }
            AbilityError::DuplicateAbility { name } => {
                McpError::internal_error(ERROR_DUPLICATE_ABILITY, Some(json!({"ability": name})))
            }
            AbilityError::PermissionDenied { name, capability } => McpError::invalid_request(
                ERROR_PERMISSION_DENIED,
                Some(json!({"ability": name, "required_capability": capability})),
            ),
            AbilityError::InvalidInput { name, message } => McpError::invalid_params(
                ERROR_INVALID_INPUT,
                Some(json!({"ability": name, "message": message})),
            ),
            AbilityError::Serialization { name, message } => McpError::internal_error(
                ERROR_SERIALIZATION,
                Some(json!({"ability": name, "message": message})),
            ),
        }
    }
}
