//! EventLite API error types.

use thiserror::Error;

/// Result type for EventLite API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors raised while talking to the EventLite REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    ///
    /// `message` is the server-supplied `error` field, or `HTTP <status>`.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The request could not be sent or the response could not be read.
    #[error("Request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// A request body could not be serialized or a response body decoded.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Query string serialization failed.
    #[error("Invalid query parameters: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),

    /// Downloading a source image returned a non-success status.
    #[error("Failed to fetch image from URL: {status}")]
    Fetch { status: u16 },
}

impl ApiError {
    /// Build a status error from a response body, falling back to `HTTP <status>`.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP {}", status));

        Self::Status { status, message }
    }

    /// Create a new "request" error.
    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request(msg.into())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Request(err.to_string())
        }
    }
}
