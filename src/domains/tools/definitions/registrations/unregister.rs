//! Unregister attendee tool definition.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::api::EventLiteClient;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::format::render_registration_cancelled;
use crate::domains::tools::handlers::ToolHandler;
use crate::domains::tools::validation::{
    Validate, ValidationErrors, validate_email, validate_required,
};

/// Parameters for the unregister attendee tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnregisterAttendeeParams {
    /// Event ID (UUID) or slug
    pub event_id: String,

    /// Email address used at registration
    pub email: String,
}

impl Validate for UnregisterAttendeeParams {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_required(&self.event_id, "eventId", &mut errors);
        validate_email(&self.email, "email", &mut errors);
        errors.into_result()
    }
}

/// Unregister attendee tool - cancels a registration.
pub struct UnregisterAttendeeTool;

#[async_trait]
impl ToolHandler for UnregisterAttendeeTool {
    const NAME: &'static str = "unregister_attendee";

    const DESCRIPTION: &'static str = "Cancel a registration. If there is a waitlist, the first person on the waitlist will be automatically promoted.";

    type Params = UnregisterAttendeeParams;

    #[instrument(skip_all, fields(event = %params.event_id))]
    async fn execute(
        params: UnregisterAttendeeParams,
        client: &EventLiteClient,
    ) -> Result<String, ToolError> {
        let result = client
            .delete_registration(&params.event_id, &params.email)
            .await?;

        let promoted = result.data.as_ref().and_then(|d| d.promoted.as_ref());
        if let Some(p) = promoted {
            info!(promoted = %p.email, "Waitlist attendee promoted");
        }
        Ok(render_registration_cancelled(&params.email, promoted))
    }
}
