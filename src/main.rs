//! EventLite MCP Server entry point.
//!
//! Loads configuration, initializes logging, builds the EventLite client and
//! starts the server on the configured transport.

use std::io::IsTerminal;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use eventlite_mcp_server::core::config::LoggingConfig;
use eventlite_mcp_server::core::{Config, McpServer, TransportService};
use eventlite_mcp_server::domains::api::EventLiteClient;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Subscriber first so configuration warnings are not dropped
    init_logging(&LoggingConfig::from_env());

    let config = Config::from_env();

    info!("Starting {} v{}", config.server.name, config.server.version);

    let client = EventLiteClient::from_config(&config.api)
        .context("Cannot start without EventLite credentials")?;
    info!("EventLite API at {}", client.base_url());

    let transport = TransportService::new(config.transport.clone());
    let server = McpServer::new(config, client);

    transport.run(server).await?;

    info!("Server shutting down");
    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs always go to stderr: in STDIO mode stdout is the protocol channel.
/// `RUST_LOG` directives take precedence over `MCP_LOG_LEVEL`.
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.to_lowercase()));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    if logging.with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}
