pub mod debug_log_tools;

pub use debug_log_tools::DebugLogService;

use crate::config::Config;

/// Available resource URIs for the Debug Log MCP Server
pub const AVAILABLE_RESOURCES: &[&str] = &[
    "debug-log://status",
    "debug-log://help",
    "debug-log://abilities",
];

pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    use rmcp::{ServiceExt, transport::stdio};

    tracing::info!(
        "Serving debug log {} ({})",
        config.log_file.display(),
        if config.read_only { "read-only" } else { "read-write" }
    );

    let service = DebugLogService::new(&config)?
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })?;

    service.waiting().await?;
    Ok(())
}
