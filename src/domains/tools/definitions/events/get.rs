//! Get event tool definition.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::instrument;

use crate::domains::api::EventLiteClient;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::format::render_event_detail;
use crate::domains::tools::handlers::ToolHandler;
use crate::domains::tools::validation::{Validate, ValidationErrors, validate_required};

/// Parameters shared by tools that address a single event.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EventIdParams {
    /// Event ID (UUID) or slug
    pub id: String,
}

impl Validate for EventIdParams {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_required(&self.id, "id", &mut errors);
        errors.into_result()
    }
}

/// Get event tool - full details of one event.
pub struct GetEventTool;

#[async_trait]
impl ToolHandler for GetEventTool {
    const NAME: &'static str = "get_event";

    const DESCRIPTION: &'static str = "Get details of a specific event by its ID or slug. Returns full event information including registration counts.";

    type Params = EventIdParams;

    #[instrument(skip_all, fields(id = %params.id))]
    async fn execute(params: EventIdParams, client: &EventLiteClient) -> Result<String, ToolError> {
        let result = client.get_event(&params.id).await?;
        Ok(render_event_detail(&result.data, client.base_url()))
    }
}
