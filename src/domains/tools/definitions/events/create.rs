//! Create event tool definition.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::api::EventLiteClient;
use crate::domains::api::models::{EventCreateInput, EventMode, InitialEventStatus};
use crate::domains::tools::error::ToolError;
use crate::domains::tools::format::render_event_created;
use crate::domains::tools::handlers::ToolHandler;
use crate::domains::tools::validation::{
    Validate, ValidationErrors, validate_coordinate, validate_length, validate_optional_length,
    validate_range, validate_required, validate_url,
};

pub(super) const TITLE_MIN: usize = 3;
pub(super) const TITLE_MAX: usize = 100;
pub(super) const SUBTITLE_MAX: usize = 200;
pub(super) const DESCRIPTION_MAX: usize = 5000;
/// Capacity travels as an unsigned 32-bit integer.
pub(super) const CAPACITY_MAX: i64 = u32::MAX as i64;

/// Parameters for the create event tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventParams {
    /// Event title (3-100 characters)
    pub title: String,

    /// Event subtitle (max 200 characters)
    pub subtitle: Option<String>,

    /// Event description (max 5000 characters)
    pub description: Option<String>,

    /// URL of the cover image (use upload_image first to get a URL)
    pub cover_image: Option<String>,

    /// Event mode: ONLINE or IN_PERSON
    pub mode: EventMode,

    /// Venue or meeting link
    pub location: Option<String>,

    /// Latitude of the venue (-90 to 90)
    pub latitude: Option<f64>,

    /// Longitude of the venue (-180 to 180)
    pub longitude: Option<f64>,

    #[schemars(description = "Start date/time in ISO 8601 format (e.g. 2025-02-15T19:00:00Z)")]
    pub start_at: String,

    #[schemars(description = "End date/time in ISO 8601 format")]
    pub end_at: Option<String>,

    /// Maximum number of confirmed attendees
    pub capacity: Option<i64>,

    /// Accept waitlist registrations once the event is full
    pub waitlist: Option<bool>,

    #[schemars(description = "Initial status: DRAFT (default) or PUBLISHED")]
    pub status: Option<InitialEventStatus>,
}

impl Validate for CreateEventParams {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_length(&self.title, "title", TITLE_MIN, TITLE_MAX, &mut errors);
        validate_optional_length(self.subtitle.as_deref(), "subtitle", 0, SUBTITLE_MAX, &mut errors);
        validate_optional_length(
            self.description.as_deref(),
            "description",
            0,
            DESCRIPTION_MAX,
            &mut errors,
        );
        if let Some(url) = &self.cover_image {
            validate_url(url, "coverImage", &mut errors);
        }
        if let Some(latitude) = self.latitude {
            validate_coordinate(latitude, "latitude", 90.0, &mut errors);
        }
        if let Some(longitude) = self.longitude {
            validate_coordinate(longitude, "longitude", 180.0, &mut errors);
        }
        validate_required(&self.start_at, "startAt", &mut errors);
        if let Some(capacity) = self.capacity {
            validate_range(capacity, "capacity", 1, CAPACITY_MAX, &mut errors);
        }
        errors.into_result()
    }
}

impl From<CreateEventParams> for EventCreateInput {
    fn from(p: CreateEventParams) -> Self {
        Self {
            title: p.title,
            subtitle: p.subtitle,
            description: p.description,
            cover_image: p.cover_image,
            mode: p.mode,
            location: p.location,
            latitude: p.latitude,
            longitude: p.longitude,
            start_at: p.start_at,
            end_at: p.end_at,
            capacity: p.capacity.and_then(|c| u32::try_from(c).ok()),
            waitlist: p.waitlist,
            status: p.status,
        }
    }
}

/// Create event tool - creates a new event, as a draft unless told otherwise.
pub struct CreateEventTool;

#[async_trait]
impl ToolHandler for CreateEventTool {
    const NAME: &'static str = "create_event";

    const DESCRIPTION: &'static str = "Create a new event. Required: title, mode (ONLINE or IN_PERSON), startAt (ISO date). Optional: subtitle, description, coverImage (URL), location, latitude, longitude, endAt, capacity, waitlist, status (DRAFT or PUBLISHED). Events are created as DRAFT by default.";

    type Params = CreateEventParams;

    #[instrument(skip_all, fields(title = %params.title))]
    async fn execute(params: CreateEventParams, client: &EventLiteClient) -> Result<String, ToolError> {
        let input = EventCreateInput::from(params);
        let result = client.create_event(&input).await?;
        info!(slug = %result.data.slug, "Event created");
        Ok(render_event_created(&result.data, client.base_url()))
    }
}
