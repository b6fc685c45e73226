//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The ordered catalog of tools published to clients
//! - Dispatch of a tool call by name, shared by every transport
//! - Conversion of every failure into an error-flagged result

use rmcp::model::{CallToolResult, Content, Tool};
use tracing::{error, info, warn};

use crate::domains::api::EventLiteClient;

use super::definitions::{
    CreateEventTool, DeleteEventTool, GetEventTool, ListEventsTool, ListRegistrationsTool,
    RegisterAttendeeTool, SendNotificationTool, UnregisterAttendeeTool, UpdateEventTool,
    UploadImageTool,
};
use super::error::ToolError;
use super::format::render_error;
use super::handlers::ToolHandler;

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - owns the API client and routes calls to tool handlers.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    client: EventLiteClient,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(client: EventLiteClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &EventLiteClient {
        &self.client
    }

    /// Get all tool names, in catalog order.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            ListEventsTool::NAME,
            GetEventTool::NAME,
            CreateEventTool::NAME,
            UpdateEventTool::NAME,
            DeleteEventTool::NAME,
            ListRegistrationsTool::NAME,
            RegisterAttendeeTool::NAME,
            UnregisterAttendeeTool::NAME,
            SendNotificationTool::NAME,
            UploadImageTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for all available tools.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            ListEventsTool::to_tool(),
            GetEventTool::to_tool(),
            CreateEventTool::to_tool(),
            UpdateEventTool::to_tool(),
            DeleteEventTool::to_tool(),
            ListRegistrationsTool::to_tool(),
            RegisterAttendeeTool::to_tool(),
            UnregisterAttendeeTool::to_tool(),
            SendNotificationTool::to_tool(),
            UploadImageTool::to_tool(),
        ]
    }

    async fn dispatch(&self, name: &str, arguments: serde_json::Value) -> Result<String, ToolError> {
        let client = &self.client;
        match name {
            ListEventsTool::NAME => ListEventsTool::call(arguments, client).await,
            GetEventTool::NAME => GetEventTool::call(arguments, client).await,
            CreateEventTool::NAME => CreateEventTool::call(arguments, client).await,
            UpdateEventTool::NAME => UpdateEventTool::call(arguments, client).await,
            DeleteEventTool::NAME => DeleteEventTool::call(arguments, client).await,
            ListRegistrationsTool::NAME => ListRegistrationsTool::call(arguments, client).await,
            RegisterAttendeeTool::NAME => RegisterAttendeeTool::call(arguments, client).await,
            UnregisterAttendeeTool::NAME => UnregisterAttendeeTool::call(arguments, client).await,
            SendNotificationTool::NAME => SendNotificationTool::call(arguments, client).await,
            UploadImageTool::NAME => UploadImageTool::call(arguments, client).await,
            _ => Err(ToolError::unknown_tool(name)),
        }
    }

    /// Run a tool by name.
    ///
    /// Never fails: errors come back as a result with `is_error` set and a
    /// single `❌ Error: ...` text block.
    pub async fn call_tool(&self, name: &str, arguments: serde_json::Value) -> CallToolResult {
        info!(tool = name, "Tool call");

        match self.dispatch(name, arguments).await {
            Ok(text) => CallToolResult::success(vec![Content::text(text)]),
            Err(err) => {
                match &err {
                    ToolError::UnknownTool(_) => warn!("Unknown tool requested: {}", name),
                    e if e.is_local() => warn!(tool = name, "Tool call rejected: {}", e),
                    e => error!(tool = name, "Tool call failed: {}", e),
                }
                CallToolResult::error(vec![Content::text(render_error(&err.to_string()))])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::api::testing::{MockTransport, event_json};
    use std::sync::Arc;

    fn registry() -> (Arc<MockTransport>, ToolRegistry) {
        let mock = Arc::new(MockTransport::new());
        let client = EventLiteClient::with_transport("https://events.example.com", mock.clone());
        (mock, ToolRegistry::new(client))
    }

    fn text_of(result: &CallToolResult) -> String {
        assert_eq!(result.content.len(), 1);
        match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => text.text.clone(),
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_registry_tool_names() {
        let (_, registry) = registry();
        assert_eq!(
            registry.tool_names(),
            vec![
                "list_events",
                "get_event",
                "create_event",
                "update_event",
                "delete_event",
                "list_registrations",
                "register_attendee",
                "unregister_attendee",
                "send_notification",
                "upload_image",
            ]
        );
    }

    #[test]
    fn test_catalog_matches_names_and_has_schemas() {
        let (_, registry) = registry();
        let tools = ToolRegistry::get_all_tools();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert_eq!(names, registry.tool_names());

        for tool in &tools {
            assert!(tool.description.is_some());
            assert_eq!(
                tool.input_schema.get("type"),
                Some(&serde_json::json!("object"))
            );
        }
    }

    #[test]
    fn test_create_event_schema_lists_required_fields() {
        let tools = ToolRegistry::get_all_tools();
        let create = tools.iter().find(|t| t.name == "create_event").unwrap();
        let required = create.input_schema.get("required").unwrap().as_array().unwrap();
        for field in ["title", "mode", "startAt"] {
            assert!(required.contains(&serde_json::json!(field)), "{field} not required");
        }
        assert!(!required.contains(&serde_json::json!("capacity")));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_error_result() {
        let (mock, registry) = registry();
        let result = registry.call_tool("drop_database", serde_json::json!({})).await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "❌ Error: Unknown tool: drop_database");
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_success_result() {
        let (mock, registry) = registry();
        mock.push_json(200, serde_json::json!({ "data": event_json("rust-meetup", "Rust Meetup") }));

        let result = registry
            .call_tool("get_event", serde_json::json!({ "id": "rust-meetup" }))
            .await;
        assert_eq!(result.is_error, Some(false));
        assert!(text_of(&result).starts_with("# Rust Meetup"));
    }

    #[tokio::test]
    async fn test_validation_failure_is_error_result() {
        let (mock, registry) = registry();
        let result = registry
            .call_tool("list_events", serde_json::json!({ "status": "ARCHIVED" }))
            .await;

        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).starts_with("❌ Error: Invalid arguments:"));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_remote_failure_is_error_result() {
        let (mock, registry) = registry();
        mock.push_raw(502, "<html>Bad Gateway</html>");

        let result = registry
            .call_tool("delete_event", serde_json::json!({ "id": "rust-meetup" }))
            .await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "❌ Error: HTTP 502");
    }

    #[tokio::test]
    async fn test_null_arguments_treated_as_empty() {
        let (mock, registry) = registry();
        mock.push_json(200, serde_json::json!({ "data": [] }));

        let result = registry.call_tool("list_events", serde_json::Value::Null).await;
        assert_eq!(text_of(&result), "No events found.");
        assert_eq!(mock.paths(), vec!["/api/v1/events".to_string()]);
    }
}
