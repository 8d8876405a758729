use std::path::PathBuf;

use crate::abilities::{Caller, Capability};

/// Default number of bytes read per backward seek
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// File name of the debug log inside the content directory
pub const DEBUG_LOG_FILE_NAME: &str = "debug.log";

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging settings handed to `init_logging`
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Default to `debug` instead of `info` when `RUST_LOG` is unset
    pub verbose: bool,
}

impl LoggingConfig {
    pub fn default_directive(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct Config {
    pub log_file: PathBuf,
    pub chunk_size: usize,
    pub read_only: bool,
    pub logging: LoggingConfig,
}

impl Config {
    /// Capabilities granted to the MCP session
    pub fn caller(&self) -> Caller {
        if self.read_only {
            Caller::new([Capability::ViewLog])
        } else {
            Caller::new([Capability::ViewLog, Capability::ManageLog])
        }
    }
}
