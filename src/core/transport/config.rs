//! Transport configuration types.

use serde::{Deserialize, Serialize};
#[cfg(any(feature = "tcp", feature = "http"))]
use tracing::warn;

#[cfg(feature = "tcp")]
const DEFAULT_TCP_PORT: u16 = 3001;

#[cfg(feature = "http")]
const DEFAULT_HTTP_PORT: u16 = 8080;

/// Transport configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Standard input/output transport (default for MCP).
    #[cfg(feature = "stdio")]
    Stdio,

    /// TCP socket transport with line-delimited JSON-RPC messages.
    #[cfg(feature = "tcp")]
    Tcp(TcpConfig),

    /// HTTP transport with JSON-RPC over POST.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// TCP transport configuration.
#[cfg(feature = "tcp")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TcpConfig {
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

/// HTTP transport configuration.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Path for the JSON-RPC endpoint.
    #[serde(default = "default_rpc_path")]
    pub rpc_path: String,

    /// Enable CORS for browser clients. Off unless `MCP_HTTP_CORS` opts in.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

#[cfg(any(feature = "tcp", feature = "http"))]
fn default_host() -> String {
    "127.0.0.1".to_string()
}

#[cfg(feature = "http")]
fn default_rpc_path() -> String {
    "/mcp".to_string()
}

#[cfg(feature = "http")]
fn default_cors() -> bool {
    false
}

/// Parse a port variable, keeping `default` when absent or invalid.
#[cfg(any(feature = "tcp", feature = "http"))]
fn parse_port(key: &str, value: Option<String>, default: u16) -> u16 {
    match value {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}: {:?}", key, raw);
            default
        }),
        None => default,
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "stdio")]
        {
            return Self::Stdio;
        }

        #[cfg(all(not(feature = "stdio"), feature = "tcp"))]
        {
            return Self::Tcp(TcpConfig::default());
        }

        #[cfg(all(not(feature = "stdio"), not(feature = "tcp"), feature = "http"))]
        {
            return Self::Http(HttpConfig::default());
        }

        #[cfg(not(any(feature = "stdio", feature = "tcp", feature = "http")))]
        {
            compile_error!("At least one transport feature must be enabled: stdio, tcp, or http");
        }
    }
}

#[cfg(feature = "tcp")]
impl Default for TcpConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_TCP_PORT,
            host: default_host(),
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_HTTP_PORT,
            host: default_host(),
            rpc_path: default_rpc_path(),
            enable_cors: default_cors(),
        }
    }
}

impl TransportConfig {
    /// Load transport config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    ///
    /// `MCP_TRANSPORT` selects the transport; unknown or disabled values fall
    /// back to the default transport.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let transport = lookup("MCP_TRANSPORT").unwrap_or_default().to_lowercase();

        match transport.as_str() {
            #[cfg(feature = "tcp")]
            "tcp" => Self::Tcp(TcpConfig {
                port: parse_port("MCP_TCP_PORT", lookup("MCP_TCP_PORT"), DEFAULT_TCP_PORT),
                host: lookup("MCP_TCP_HOST").unwrap_or_else(default_host),
            }),
            #[cfg(feature = "http")]
            "http" => Self::Http(HttpConfig {
                port: parse_port("MCP_HTTP_PORT", lookup("MCP_HTTP_PORT"), DEFAULT_HTTP_PORT),
                host: lookup("MCP_HTTP_HOST").unwrap_or_else(default_host),
                rpc_path: lookup("MCP_HTTP_PATH").unwrap_or_else(default_rpc_path),
                enable_cors: lookup("MCP_HTTP_CORS")
                    .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
                    .unwrap_or_else(default_cors),
            }),
            _ => Self::default(),
        }
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            #[cfg(feature = "tcp")]
            Self::Tcp(cfg) => format!("TCP on {}:{}", cfg.host, cfg.port),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}:{}{}", cfg.host, cfg.port, cfg.rpc_path),
        }
    }

    /// Check if this transport is the standard STDIO mode.
    ///
    /// Logging must stay off stdout in that mode.
    pub fn is_stdio(&self) -> bool {
        #[cfg(feature = "stdio")]
        {
            matches!(self, Self::Stdio)
        }
        #[cfg(not(feature = "stdio"))]
        {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[cfg(feature = "stdio")]
    #[test]
    fn test_defaults_to_stdio() {
        let config = TransportConfig::from_lookup(lookup(&[]));
        assert!(config.is_stdio());

        let config = TransportConfig::from_lookup(lookup(&[("MCP_TRANSPORT", "carrier-pigeon")]));
        assert!(config.is_stdio());
    }

    #[cfg(feature = "tcp")]
    #[test]
    fn test_tcp_from_vars() {
        let config = TransportConfig::from_lookup(lookup(&[
            ("MCP_TRANSPORT", "TCP"),
            ("MCP_TCP_PORT", "4100"),
            ("MCP_TCP_HOST", "0.0.0.0"),
        ]));
        assert_eq!(config.description(), "TCP on 0.0.0.0:4100");
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_cors_is_opt_in() {
        assert!(!HttpConfig::default().enable_cors);

        let cases = [
            (None, false),
            (Some("true"), true),
            (Some("1"), true),
            (Some("no"), false),
        ];
        for (value, expected) in cases {
            let mut vars = vec![("MCP_TRANSPORT", "http")];
            if let Some(value) = value {
                vars.push(("MCP_HTTP_CORS", value));
            }
            match TransportConfig::from_lookup(lookup(&vars)) {
                TransportConfig::Http(cfg) => assert_eq!(cfg.enable_cors, expected, "{:?}", value),
                #[allow(unreachable_patterns)]
                other => panic!("unexpected transport: {:?}", other),
            }
        }
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_invalid_port_falls_back() {
        let config = TransportConfig::from_lookup(lookup(&[
            ("MCP_TRANSPORT", "http"),
            ("MCP_HTTP_PORT", "eighty"),
            ("MCP_HTTP_CORS", "false"),
        ]));
        match config {
            TransportConfig::Http(cfg) => {
                assert_eq!(cfg.port, DEFAULT_HTTP_PORT);
                assert_eq!(cfg.rpc_path, "/mcp");
                assert!(!cfg.enable_cors);
            }
            #[allow(unreachable_patterns)]
            other => panic!("unexpected transport: {:?}", other),
        }
    }
}
