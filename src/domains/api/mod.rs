//! EventLite API domain.
//!
//! Typed client for the remote event-management REST service.
//!
//! ## Architecture
//!
//! - `client.rs` - [`EventLiteClient`], one method per remote endpoint
//! - `transport.rs` - [`ApiTransport`] seam and the `reqwest` implementation
//! - `models.rs` - Request and response wire types
//! - `error.rs` - [`ApiError`]

mod client;
mod error;
pub mod models;
mod transport;

#[cfg(test)]
pub mod testing;

pub use client::{EventListQuery, EventLiteClient, RegistrationListQuery, encode_segment};
pub use error::{ApiError, ApiResult};
pub use transport::{ApiReply, ApiRequest, ApiTransport, HttpApiTransport};
