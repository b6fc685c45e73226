//! Tool handler trait.
//!
//! Every tool in `definitions/` implements [`ToolHandler`]: a typed parameter
//! struct (which also yields the published input schema), a validation step
//! and an `execute()` that talks to the EventLite API and renders text.

use async_trait::async_trait;
use rmcp::handler::server::tool::schema_for_type;
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use tracing::warn;

use super::error::ToolError;
use super::validation::Validate;
use crate::domains::api::EventLiteClient;

/// Decode raw tool arguments into a parameter struct.
pub fn parse_arguments<P: DeserializeOwned>(arguments: serde_json::Value) -> Result<P, ToolError> {
    let arguments = match arguments {
        serde_json::Value::Null => serde_json::Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(arguments).map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// A tool exposed to MCP clients.
#[async_trait]
pub trait ToolHandler: Send + Sync + 'static {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Typed arguments; their JSON schema is published as `inputSchema`.
    type Params: DeserializeOwned + JsonSchema + Validate + Send + 'static;

    /// Run the tool against the API and render the result as text.
    async fn execute(params: Self::Params, client: &EventLiteClient) -> Result<String, ToolError>;

    /// Create a Tool model for this tool (metadata).
    fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<Self::Params>().into(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Parse, validate, then execute. Nothing reaches the network unless the
    /// arguments pass validation.
    async fn call(
        arguments: serde_json::Value,
        client: &EventLiteClient,
    ) -> Result<String, ToolError> {
        let params: Self::Params = parse_arguments(arguments)?;

        if let Err(errors) = params.validate() {
            warn!(tool = Self::NAME, "Rejected arguments: {}", errors);
            return Err(errors.into());
        }

        Self::execute(params, client).await
    }
}
