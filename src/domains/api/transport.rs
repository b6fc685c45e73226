//! HTTP exchange with the EventLite service.
//!
//! [`ApiTransport`] is the seam between request construction (in
//! [`EventLiteClient`](super::EventLiteClient)) and the wire. The production
//! implementation is [`HttpApiTransport`], backed by `reqwest`.

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::{debug, instrument};

use super::error::{ApiError, ApiResult};
use crate::core::config::ApiConfig;

/// A request relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path and query string, e.g. `/api/v1/events?limit=10`.
    pub path: String,
    pub body: Option<serde_json::Value>,
}

/// Raw response: status code and body text.
#[derive(Debug, Clone)]
pub struct ApiReply {
    pub status: u16,
    pub body: String,
}

impl ApiReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs HTTP exchanges on behalf of the client.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Send an authenticated request to the EventLite API.
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiReply>;

    /// Download raw bytes from an arbitrary URL (no API credentials attached).
    async fn fetch(&self, url: &str) -> ApiResult<Vec<u8>>;
}

/// `reqwest`-backed transport holding the base URL and bearer token.
pub struct HttpApiTransport {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpApiTransport {
    /// Build a transport for the given base URL and key.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("eventlite-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Build a transport from the API configuration section.
    pub fn from_config(config: &ApiConfig, api_key: &str) -> ApiResult<Self> {
        Self::new(
            config.base_url.clone(),
            api_key,
            Duration::from_secs(config.timeout_secs),
        )
    }
}

#[async_trait]
impl ApiTransport for HttpApiTransport {
    #[instrument(skip_all, fields(method = %request.method, path = %request.path))]
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiReply> {
        let url = format!("{}{}", self.base_url, request.path);

        let mut builder = self
            .http
            .request(request.method, &url)
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, "application/json");

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!("EventLite responded with HTTP {}", status);

        Ok(ApiReply { status, body })
    }

    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> ApiResult<Vec<u8>> {
        let response = self.http.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::Fetch {
                status: response.status().as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        debug!("Fetched {} bytes from {}", bytes.len(), url);

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let transport =
            HttpApiTransport::new("https://events.example.com/", "key", Duration::from_secs(5))
                .unwrap();
        assert_eq!(transport.base_url, "https://events.example.com");
    }

    #[test]
    fn test_reply_success_range() {
        let ok = ApiReply { status: 201, body: String::new() };
        let not_found = ApiReply { status: 404, body: String::new() };
        let redirect = ApiReply { status: 302, body: String::new() };
        assert!(ok.is_success());
        assert!(!not_found.is_success());
        assert!(!redirect.is_success());
    }
}
