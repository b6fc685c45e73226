//! Update event tool definition.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer};
use tracing::{info, instrument};

use super::create::{CAPACITY_MAX, DESCRIPTION_MAX, SUBTITLE_MAX, TITLE_MAX, TITLE_MIN};
use crate::domains::api::EventLiteClient;
use crate::domains::api::models::{EventMode, EventStatus, EventUpdateInput};
use crate::domains::tools::error::ToolError;
use crate::domains::tools::format::render_event_updated;
use crate::domains::tools::handlers::ToolHandler;
use crate::domains::tools::validation::{
    Validate, ValidationErrors, validate_coordinate, validate_optional_length, validate_range,
    validate_required, validate_url,
};

/// Distinguish an explicit `null` (`Some(None)`) from an absent field (`None`).
fn deserialize_some<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Parameters for the update event tool. Only provided fields are changed.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventParams {
    /// Event ID (UUID) or slug
    pub id: String,

    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,

    #[serde(default, deserialize_with = "deserialize_some")]
    #[schemars(with = "Option<String>", description = "Cover image URL, or null to remove it")]
    pub cover_image: Option<Option<String>>,

    pub mode: Option<EventMode>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub start_at: Option<String>,
    pub end_at: Option<String>,
    pub capacity: Option<i64>,
    pub waitlist: Option<bool>,

    #[schemars(description = "New status: DRAFT, PUBLISHED, CLOSED or CANCELLED")]
    pub status: Option<EventStatus>,
}

impl Validate for UpdateEventParams {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_required(&self.id, "id", &mut errors);
        validate_optional_length(self.title.as_deref(), "title", TITLE_MIN, TITLE_MAX, &mut errors);
        validate_optional_length(self.subtitle.as_deref(), "subtitle", 0, SUBTITLE_MAX, &mut errors);
        validate_optional_length(
            self.description.as_deref(),
            "description",
            0,
            DESCRIPTION_MAX,
            &mut errors,
        );
        if let Some(Some(url)) = &self.cover_image {
            validate_url(url, "coverImage", &mut errors);
        }
        if let Some(latitude) = self.latitude {
            validate_coordinate(latitude, "latitude", 90.0, &mut errors);
        }
        if let Some(longitude) = self.longitude {
            validate_coordinate(longitude, "longitude", 180.0, &mut errors);
        }
        if let Some(start_at) = &self.start_at {
            validate_required(start_at, "startAt", &mut errors);
        }
        if let Some(capacity) = self.capacity {
            validate_range(capacity, "capacity", 1, CAPACITY_MAX, &mut errors);
        }
        errors.into_result()
    }
}

impl UpdateEventParams {
    /// Split into the addressed event and the partial body.
    fn into_parts(self) -> (String, EventUpdateInput) {
        let input = EventUpdateInput {
            title: self.title,
            subtitle: self.subtitle,
            description: self.description,
            cover_image: self.cover_image,
            mode: self.mode,
            location: self.location,
            latitude: self.latitude,
            longitude: self.longitude,
            start_at: self.start_at,
            end_at: self.end_at,
            capacity: self.capacity.and_then(|c| u32::try_from(c).ok()),
            waitlist: self.waitlist,
            status: self.status,
        };
        (self.id, input)
    }
}

/// Update event tool - partial update, also used to publish, close or cancel.
pub struct UpdateEventTool;

#[async_trait]
impl ToolHandler for UpdateEventTool {
    const NAME: &'static str = "update_event";

    const DESCRIPTION: &'static str = "Update an existing event. Provide the event ID or slug and the fields to update. Use status to publish (PUBLISHED), close registrations (CLOSED), or cancel (CANCELLED) an event.";

    type Params = UpdateEventParams;

    #[instrument(skip_all, fields(id = %params.id))]
    async fn execute(params: UpdateEventParams, client: &EventLiteClient) -> Result<String, ToolError> {
        let (id, input) = params.into_parts();
        let result = client.update_event(&id, &input).await?;
        info!(status = %result.data.status, "Event updated");
        Ok(render_event_updated(&result.data))
    }
}
