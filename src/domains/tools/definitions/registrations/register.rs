//! Register attendee tool definition.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::api::EventLiteClient;
use crate::domains::api::models::RegistrationCreateInput;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::format::render_registration_created;
use crate::domains::tools::handlers::ToolHandler;
use crate::domains::tools::validation::{
    Validate, ValidationErrors, validate_email, validate_length, validate_optional_length,
    validate_required,
};

/// Parameters for the register attendee tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAttendeeParams {
    /// Event ID (UUID) or slug
    pub event_id: String,

    /// Attendee email address
    pub email: String,

    /// Attendee full name (1-100 characters)
    pub name: String,

    /// Free-form notes (max 500 characters)
    pub notes: Option<String>,
}

impl Validate for RegisterAttendeeParams {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_required(&self.event_id, "eventId", &mut errors);
        validate_email(&self.email, "email", &mut errors);
        validate_length(&self.name, "name", 1, 100, &mut errors);
        validate_optional_length(self.notes.as_deref(), "notes", 0, 500, &mut errors);
        errors.into_result()
    }
}

/// Register attendee tool - adds someone to an event, or to its waitlist when full.
pub struct RegisterAttendeeTool;

#[async_trait]
impl ToolHandler for RegisterAttendeeTool {
    const NAME: &'static str = "register_attendee";

    const DESCRIPTION: &'static str = "Register an attendee to an event. If the event is full and has waitlist enabled, the attendee will be added to the waitlist.";

    type Params = RegisterAttendeeParams;

    #[instrument(skip_all, fields(event = %params.event_id))]
    async fn execute(
        params: RegisterAttendeeParams,
        client: &EventLiteClient,
    ) -> Result<String, ToolError> {
        let input = RegistrationCreateInput {
            email: params.email,
            name: params.name,
            notes: params.notes,
        };
        let result = client.create_registration(&params.event_id, &input).await?;
        info!(status = %result.data.status, "Attendee registered");
        Ok(render_registration_created(&result.data))
    }
}
