//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (and an optional `.env` file) on top of defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default EventLite instance when `EVENTLITE_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// EventLite API connection settings.
    pub api: ApiConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Connection settings for the EventLite REST API.
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the EventLite instance, without trailing slash.
    pub base_url: String,

    /// Bearer token. Required to start the server.
    pub api_key: Option<String>,

    /// Upper bound for a single HTTP request, in seconds.
    pub timeout_secs: u64,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "eventlite-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig::default(),
            transport: TransportConfig::default(),
            api: ApiConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_timestamps: true,
        }
    }
}

impl LoggingConfig {
    /// Read `MCP_LOG_LEVEL` and `MCP_LOG_TIMESTAMPS`.
    ///
    /// Emits nothing, so it can run before the subscriber is installed.
    pub fn from_env() -> Self {
        let mut logging = Self::default();
        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            logging.level = level;
        }
        if let Ok(flag) = std::env::var("MCP_LOG_TIMESTAMPS") {
            logging.with_timestamps = !matches!(flag.to_lowercase().as_str(), "false" | "0");
        }
        logging
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, `MCP_TRANSPORT`, ...); API settings use `EVENTLITE_`
    /// (`EVENTLITE_API_URL`, `EVENTLITE_API_KEY`, `EVENTLITE_TIMEOUT_SECS`).
    ///
    /// Problems are reported through `tracing`, so install the subscriber
    /// first (see [`LoggingConfig::from_env`]).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        config.logging = LoggingConfig::from_env();

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Ok(url) = std::env::var("EVENTLITE_API_URL") {
            config.api.base_url = url.trim_end_matches('/').to_string();
        }

        match std::env::var("EVENTLITE_API_KEY") {
            Ok(key) if !key.is_empty() => {
                config.api.api_key = Some(key);
                info!("EventLite API key loaded from environment");
            }
            _ => warn!("EVENTLITE_API_KEY is not set"),
        }

        if let Ok(timeout) = std::env::var("EVENTLITE_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) if secs > 0 => config.api.timeout_secs = secs,
                _ => warn!(
                    "Ignoring invalid EVENTLITE_TIMEOUT_SECS={:?}, using {}s",
                    timeout, DEFAULT_TIMEOUT_SECS
                ),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_api_settings_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("EVENTLITE_API_URL", "https://events.example.com/");
            std::env::set_var("EVENTLITE_API_KEY", "el_test_12345");
            std::env::set_var("EVENTLITE_TIMEOUT_SECS", "5");
        }
        let config = Config::from_env();
        assert_eq!(config.api.base_url, "https://events.example.com");
        assert_eq!(config.api.api_key.as_deref(), Some("el_test_12345"));
        assert_eq!(config.api.timeout_secs, 5);
        unsafe {
            std::env::remove_var("EVENTLITE_API_URL");
            std::env::remove_var("EVENTLITE_API_KEY");
            std::env::remove_var("EVENTLITE_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_api_defaults_without_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var("EVENTLITE_API_URL");
            std::env::remove_var("EVENTLITE_API_KEY");
            std::env::set_var("EVENTLITE_TIMEOUT_SECS", "soon");
        }
        let config = Config::from_env();
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
        assert!(config.api.api_key.is_none());
        assert_eq!(config.api.timeout_secs, DEFAULT_TIMEOUT_SECS);
        unsafe {
            std::env::remove_var("EVENTLITE_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_logging_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_LOG_LEVEL", "debug");
            std::env::set_var("MCP_LOG_TIMESTAMPS", "false");
        }
        let logging = LoggingConfig::from_env();
        assert_eq!(logging.level, "debug");
        assert!(!logging.with_timestamps);
        assert_eq!(Config::from_env().logging.level, "debug");
        unsafe {
            std::env::remove_var("MCP_LOG_LEVEL");
            std::env::remove_var("MCP_LOG_TIMESTAMPS");
        }
        let logging = LoggingConfig::from_env();
        assert_eq!(logging.level, "info");
        assert!(logging.with_timestamps);
    }

    #[test]
    fn test_api_key_redacted_in_debug() {
        let api = ApiConfig {
            api_key: Some("super_secret_key".to_string()),
            ..Default::default()
        };
        let debug_str = format!("{:?}", api);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
    }
}
