//! Domains module containing business logic organized by bounded contexts.
//!
//! - `api` talks to the EventLite REST service
//! - `tools` exposes that service to MCP clients as tools

pub mod api;
pub mod tools;
