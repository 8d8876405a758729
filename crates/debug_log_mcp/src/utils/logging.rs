use tracing_subscriber::{EnvFilter, prelude::*};

use crate::config::{LogFormat, LoggingConfig};
use crate::errors::{DebugLogMcpError, DebugLogMcpResult};

/// Initialize logging from an explicit configuration
///
/// Output always goes to stderr because stdout carries the MCP stream.
///
/// # Environment Variables
/// - `RUST_LOG`: Overrides the level filter (trace, debug, info, warn, error)
///
/// # Returns
/// - `Ok(())` if logging is successfully initialized
/// - `Err(DebugLogMcpError::LoggingInitialization)` if a global subscriber is already set
pub fn init_logging(config: &LoggingConfig) -> DebugLogMcpResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

    let result = match config.format {
        LogFormat::Pretty => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .pretty();
            tracing_subscriber::registry()
                .with(fmt_layer)
                .with(env_filter)
                .try_init()
        }
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .json();
            tracing_subscriber::registry()
                .with(fmt_layer)
                .with(env_filter)
                .try_init()
        }
    };

    result.map_err(|e| DebugLogMcpError::LoggingInitialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let config = LoggingConfig::default();
        // Another test may already own the global subscriber, so only the second call is checked
        let _ = init_logging(&config);
        let result = init_logging(&config);
        assert!(matches!(
            result,
            Err(DebugLogMcpError::LoggingInitialization(_))
        ));
    }
}
