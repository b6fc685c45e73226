//! MCP Server implementation and lifecycle management.
//!
//! The server handler publishes the tool catalog and forwards every call to
//! the [`ToolRegistry`]. Tool failures, including unknown tool names, are
//! returned as error-flagged results rather than protocol errors.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use std::sync::Arc;
use tracing::{debug, instrument};

use super::config::Config;
use crate::domains::api::EventLiteClient;
use crate::domains::tools::ToolRegistry;

const INSTRUCTIONS: &str = "EventLite MCP server. Manage events (list, get, create, update, delete), \
their registrations (list, register, unregister), email notifications to attendees, and cover \
image uploads. Events are created as DRAFT: publish them with update_event and status PUBLISHED.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool catalog and dispatcher.
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create a new MCP server talking to EventLite through `client`.
    pub fn new(config: Config, client: EventLiteClient) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(ToolRegistry::new(client)),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        ToolRegistry::get_all_tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    pub async fn call_tool(&self, name: &str, arguments: serde_json::Value) -> serde_json::Value {
        let result = self.registry.call_tool(name, arguments).await;
        serde_json::json!({
            "content": result.content,
            "isError": result.is_error.unwrap_or(false)
        })
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _request, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        debug!("Listing tools");
        Ok(ListToolsResult {
            tools: ToolRegistry::get_all_tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let arguments = request
            .arguments
            .map(serde_json::Value::Object)
            .unwrap_or(serde_json::Value::Null);
        Ok(self.registry.call_tool(&request.name, arguments).await)
    }
}
