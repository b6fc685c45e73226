//! Tool-specific error types.

use thiserror::Error;

use super::image::ImageError;
use super::validation::ValidationErrors;
use crate::domains::api::ApiError;

/// Errors that can occur during a tool invocation.
///
/// Every variant is rendered into an error-flagged tool result by the
/// dispatcher; none of them abort the server.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Arguments could not be decoded into the tool's parameter type.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Arguments decoded but broke one or more field constraints.
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// A tool-specific precondition was not met.
    #[error("{0}")]
    Usage(String),

    /// The EventLite API call failed.
    #[error("{0}")]
    Remote(#[from] ApiError),

    /// Image preparation failed before upload.
    #[error("{0}")]
    Image(#[from] ImageError),
}

impl ToolError {
    /// Create a new "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "usage" error.
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    /// Whether the failure happened before any network call.
    pub fn is_local(&self) -> bool {
        !matches!(self, Self::Remote(_))
    }
}
