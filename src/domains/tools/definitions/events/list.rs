//! List events tool definition.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::api::models::EventStatus;
use crate::domains::api::{EventListQuery, EventLiteClient};
use crate::domains::tools::error::ToolError;
use crate::domains::tools::format::render_event_list;
use crate::domains::tools::handlers::ToolHandler;
use crate::domains::tools::validation::{
    Validate, ValidationErrors, validate_non_negative, validate_range,
};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the list events tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsParams {
    /// Filter events by status
    pub status: Option<EventStatus>,

    /// Free-text search on title and description
    pub search: Option<String>,

    /// Only events located in this city
    pub city: Option<String>,

    /// Only events that have not started yet
    pub upcoming: Option<bool>,

    #[schemars(description = "Maximum number of events to return (default: 50, max: 100)")]
    pub limit: Option<i64>,

    #[schemars(description = "Number of events to skip (for pagination)")]
    pub offset: Option<i64>,
}

impl Validate for ListEventsParams {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(limit) = self.limit {
            validate_range(limit, "limit", 1, 100, &mut errors);
        }
        if let Some(offset) = self.offset {
            validate_non_negative(offset, "offset", &mut errors);
        }
        errors.into_result()
    }
}

impl ListEventsParams {
    fn to_query(&self) -> EventListQuery {
        EventListQuery {
            status: self.status,
            search: self.search.clone(),
            city: self.city.clone(),
            upcoming: self.upcoming.unwrap_or(false),
            limit: self.limit.map(|l| l as u32),
            offset: self.offset.map(|o| o as u64),
        }
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// List events tool - lists events with optional filters.
pub struct ListEventsTool;

#[async_trait]
impl ToolHandler for ListEventsTool {
    const NAME: &'static str = "list_events";

    const DESCRIPTION: &'static str = "List all events. Can filter by status (DRAFT, PUBLISHED, CLOSED, CANCELLED), search text, city, or upcoming only. Returns event details including registration counts.";

    type Params = ListEventsParams;

    #[instrument(skip_all, fields(status = ?params.status))]
    async fn execute(params: ListEventsParams, client: &EventLiteClient) -> Result<String, ToolError> {
        let result = client.list_events(&params.to_query()).await?;
        info!("Listed {} event(s)", result.data.len());
        Ok(render_event_list(&result.data, client.base_url()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::api::testing::{MockTransport, event_json};
    use std::sync::Arc;
    use tokio_test::{assert_err, assert_ok};

    fn setup() -> (Arc<MockTransport>, EventLiteClient) {
        let mock = Arc::new(MockTransport::new());
        let client = EventLiteClient::with_transport("https://events.example.com", mock.clone());
        (mock, client)
    }

    #[tokio::test]
    async fn test_empty_list_renders_none_found() {
        let (mock, client) = setup();
        mock.push_json(200, serde_json::json!({ "data": [], "pagination": {
            "total": 0, "limit": 50, "offset": 0, "has_more": false
        }}));

        let text = assert_ok!(ListEventsTool::call(serde_json::json!({}), &client).await);
        assert_eq!(text, "No events found.");
    }

    #[tokio::test]
    async fn test_list_renders_each_event() {
        let (mock, client) = setup();
        mock.push_json(200, serde_json::json!({ "data": [
            event_json("rust-meetup", "Rust Meetup"),
            event_json("go-night", "Go Night")
        ]}));

        let args = serde_json::json!({ "status": "DRAFT", "limit": 2 });
        let text = assert_ok!(ListEventsTool::call(args, &client).await);
        assert!(text.starts_with("Found 2 event(s):"));
        assert!(text.contains("- **Rust Meetup** (DRAFT)"));
        assert!(text.contains("🔗 https://events.example.com/e/go-night"));
        assert_eq!(mock.paths(), vec!["/api/v1/events?status=DRAFT&limit=2".to_string()]);
    }

    #[tokio::test]
    async fn test_invalid_status_rejected_before_network() {
        let (mock, client) = setup();
        let args = serde_json::json!({ "status": "ARCHIVED" });
        let err = assert_err!(ListEventsTool::call(args, &client).await);
        assert!(matches!(err, ToolError::InvalidArguments(_)));
        assert!(err.to_string().contains("ARCHIVED"));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_limit_out_of_range_rejected() {
        let (mock, client) = setup();
        let args = serde_json::json!({ "limit": 500, "offset": -1 });
        let err = assert_err!(ListEventsTool::call(args, &client).await);
        match err {
            ToolError::Validation(errors) => assert_eq!(errors.fields(), vec!["limit", "offset"]),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(mock.call_count(), 0);
    }
}
