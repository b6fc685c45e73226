//! EventLite MCP Server
//!
//! Exposes the EventLite event-management REST API to AI agents as ten
//! Model Context Protocol tools: events, registrations, attendee
//! notifications and cover image upload.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server handler and transports
//! - **domains**
//!   - **api**: typed client for the EventLite REST API
//!   - **tools**: tool definitions, validation, text rendering and dispatch
//!
//! # Example
//!
//! ```rust,no_run
//! use eventlite_mcp_server::core::{Config, McpServer, TransportService};
//! use eventlite_mcp_server::domains::api::EventLiteClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let client = EventLiteClient::from_config(&config.api)?;
//!     let transport = TransportService::new(config.transport.clone());
//!     transport.run(McpServer::new(config, client)).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
