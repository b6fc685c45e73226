//! Transport layer for the MCP server.
//!
//! - **STDIO** (feature `stdio`, default): standard MCP mode
//! - **TCP** (feature `tcp`): line-delimited JSON-RPC, one session per connection
//! - **HTTP** (feature `http`): JSON-RPC over POST via axum
//!
//! Each transport only moves messages; tool handling lives in
//! [`McpServer`](crate::core::McpServer).

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;

#[cfg(feature = "http")]
pub use config::HttpConfig;
