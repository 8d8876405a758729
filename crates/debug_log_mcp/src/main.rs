mod abilities;
mod application;
mod cli;
mod config;
mod domain;
mod errors;
mod handlers;
mod models;
mod utils;

use cli::Cli;
use handlers::run;
use utils::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse CLI arguments
    let config = Cli::parse_config()?;

    logging::init_logging(&config.logging)?;

    // Run the MCP server
    if let Err(e) = run(config).await {
        tracing::error!("Failed to run MCP server: {}", e);
        return Err(e);
    }

    Ok(())
}
