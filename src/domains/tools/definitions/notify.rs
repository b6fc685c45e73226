//! Send notification tool definition.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::domains::api::EventLiteClient;
use crate::domains::api::models::{NotificationInput, NotificationTarget};
use crate::domains::tools::error::ToolError;
use crate::domains::tools::format::{render_notification_preview, render_notification_sent};
use crate::domains::tools::handlers::ToolHandler;
use crate::domains::tools::validation::{
    Validate, ValidationErrors, validate_length, validate_required,
};

/// Parameters for the send notification tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationParams {
    /// Event ID (UUID) or slug
    pub event_id: String,

    /// Email subject (1-200 characters)
    pub subject: String,

    /// Email body (1-5000 characters)
    pub message: String,

    #[schemars(description = "Recipients: all (default), confirmed or waitlist")]
    pub target: Option<NotificationTarget>,

    /// Append the event date, location and link to the email
    pub include_event_details: Option<bool>,

    /// Only count recipients, send nothing
    pub preview: Option<bool>,
}

impl Validate for SendNotificationParams {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_required(&self.event_id, "eventId", &mut errors);
        validate_length(&self.subject, "subject", 1, 200, &mut errors);
        validate_length(&self.message, "message", 1, 5000, &mut errors);
        errors.into_result()
    }
}

/// Send notification tool - emails the attendees of an event.
pub struct SendNotificationTool;

#[async_trait]
impl ToolHandler for SendNotificationTool {
    const NAME: &'static str = "send_notification";

    const DESCRIPTION: &'static str = "Send an email notification to event attendees. Can target all, confirmed only, or waitlist only. Use preview=true to see how many people will receive it without sending.";

    type Params = SendNotificationParams;

    #[instrument(skip_all, fields(event = %params.event_id, preview = params.preview.unwrap_or(false)))]
    async fn execute(
        params: SendNotificationParams,
        client: &EventLiteClient,
    ) -> Result<String, ToolError> {
        let input = NotificationInput {
            subject: params.subject,
            message: params.message,
            target: params.target,
            include_event_details: params.include_event_details,
        };

        if params.preview.unwrap_or(false) {
            let result = client
                .preview_notification(&params.event_id, &input)
                .await?;
            let target = input.target.unwrap_or(NotificationTarget::All);
            return Ok(render_notification_preview(
                &result.data,
                target.as_str(),
                &input.subject,
                &input.message,
            ));
        }

        let result = client.send_notification(&params.event_id, &input).await?;
        if result.data.failed > 0 {
            warn!("{} notification(s) failed to deliver", result.data.failed);
        }
        info!("{} notification(s) sent", result.data.sent);
        Ok(render_notification_sent(&result.data))
    }
}
