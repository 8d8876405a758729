use std::path::{Path, PathBuf};

use clap::Parser;

use crate::config::{Config, DEBUG_LOG_FILE_NAME, DEFAULT_CHUNK_SIZE, LogFormat, LoggingConfig};
use crate::errors::{DebugLogMcpError, DebugLogMcpResult};

/// Debug Log MCP Server
///
/// A Model Context Protocol server that reads and clears an application's
/// `debug.log` without loading the whole file into memory.
///
/// ## Features
/// - **Tools**: `read_log`, `clear_log`, `log_info`
/// - **Permissions**: `--read-only` withholds the capability needed to clear the log
/// - **Efficiency**: the tail is read backwards in fixed-size chunks
///
/// ## Development
/// ```bash
/// npx @modelcontextprotocol/inspector cargo run --bin mcp-server-debug-log -- --content-dir /var/www/wp-content
/// ```
///
/// ## Configuration
/// Add to your MCP client configuration:
/// ```json
/// {
///   "mcpServers": {
///     "debug-log": {
///       "command": "mcp-server-debug-log",
///       "args": ["--content-dir", "/var/www/wp-content", "--read-only"],
///       "env": {
///         "RUST_LOG": "info"
///       }
///     }
///   }
/// }
/// ```
///
/// ## Environment Variables
/// - `RUST_LOG`: Controls logging verbosity (trace, debug, info, warn, error)
#[derive(Parser, Debug, Clone)]
#[command(name = "mcp-server-debug-log")]
#[command(about = "An MCP server for reading and clearing debug logs")]
#[command(version)]
#[command(
    long_about = "A Model Context Protocol (MCP) server that exposes a debug log file. \nReads the last lines of the log efficiently, reports its size, and can clear it."
)]
pub struct Cli {
    /// Directory containing `debug.log`
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub content_dir: PathBuf,

    /// Explicit log file path, overriding `<content-dir>/debug.log`
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Bytes read per backward step when tailing the log
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Expose the log for reading only; `clear_log` is refused
    #[arg(long)]
    pub read_only: bool,

    /// Format of the server's own diagnostics on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Log at debug level when `RUST_LOG` is not set
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse process arguments and convert them to configuration
    pub fn parse_config() -> DebugLogMcpResult<Config> {
        Self::parse().into_config()
    }

    pub fn into_config(self) -> DebugLogMcpResult<Config> {
        if self.chunk_size == 0 {
            return Err(DebugLogMcpError::InvalidConfig {
                message: "--chunk-size must be at least 1".to_string(),
            });
        }

        let log_file = self
            .log_file
            .unwrap_or_else(|| self.content_dir.join(DEBUG_LOG_FILE_NAME));
        let log_file = resolve_log_file(&log_file)?;

        Ok(Config {
            log_file,
            chunk_size: self.chunk_size,
            read_only: self.read_only,
            logging: LoggingConfig {
                format: self.log_format,
                verbose: self.verbose,
            },
        })
    }
}

/// Make `path` absolute and require its directory to exist
///
/// The file itself may be missing; hosts often create the log lazily.
fn resolve_log_file(path: &Path) -> DebugLogMcpResult<PathBuf> {
    let absolute = std::path::absolute(path).map_err(|e| DebugLogMcpError::InvalidConfig {
        message: format!("Cannot resolve {}: {}", path.display(), e),
    })?;

    let parent = absolute.parent().unwrap_or(Path::new("/"));
    if !parent.is_dir() {
        return Err(DebugLogMcpError::DirectoryNotFound {
            path: parent.display().to_string(),
        });
    }
    Ok(absolute)
}
