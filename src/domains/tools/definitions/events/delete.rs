//! Delete event tool definition.

use async_trait::async_trait;
use tracing::{info, instrument};

use super::get::EventIdParams;
use crate::domains::api::EventLiteClient;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::format::render_event_deleted;
use crate::domains::tools::handlers::ToolHandler;

/// Delete event tool - removes an event and its registrations.
pub struct DeleteEventTool;

#[async_trait]
impl ToolHandler for DeleteEventTool {
    const NAME: &'static str = "delete_event";

    const DESCRIPTION: &'static str = "Delete an event permanently. This will also delete all registrations. Use with caution!";

    type Params = EventIdParams;

    #[instrument(skip_all, fields(id = %params.id))]
    async fn execute(params: EventIdParams, client: &EventLiteClient) -> Result<String, ToolError> {
        client.delete_event(&params.id).await?;
        info!("Event deleted");
        Ok(render_event_deleted())
    }
}
