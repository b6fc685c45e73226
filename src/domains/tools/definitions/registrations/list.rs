//! List registrations tool definition.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::api::models::RegistrationStatus;
use crate::domains::api::{EventLiteClient, RegistrationListQuery};
use crate::domains::tools::error::ToolError;
use crate::domains::tools::format::render_registration_list;
use crate::domains::tools::handlers::ToolHandler;
use crate::domains::tools::validation::{
    Validate, ValidationErrors, validate_non_negative, validate_range, validate_required,
};

/// Parameters for the list registrations tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListRegistrationsParams {
    /// Event ID (UUID) or slug
    pub event_id: String,

    /// Filter by registration status
    pub status: Option<RegistrationStatus>,

    #[schemars(description = "Maximum number of registrations to return (default: 50, max: 100)")]
    pub limit: Option<i64>,

    #[schemars(description = "Number of registrations to skip (for pagination)")]
    pub offset: Option<i64>,
}

impl Validate for ListRegistrationsParams {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_required(&self.event_id, "eventId", &mut errors);
        if let Some(limit) = self.limit {
            validate_range(limit, "limit", 1, 100, &mut errors);
        }
        if let Some(offset) = self.offset {
            validate_non_negative(offset, "offset", &mut errors);
        }
        errors.into_result()
    }
}

/// List registrations tool - attendees of one event.
pub struct ListRegistrationsTool;

#[async_trait]
impl ToolHandler for ListRegistrationsTool {
    const NAME: &'static str = "list_registrations";

    const DESCRIPTION: &'static str = "List all registrations for an event. Can filter by status (CONFIRMED, WAITLIST, CANCELLED).";

    type Params = ListRegistrationsParams;

    #[instrument(skip_all, fields(event = %params.event_id))]
    async fn execute(
        params: ListRegistrationsParams,
        client: &EventLiteClient,
    ) -> Result<String, ToolError> {
        let query = RegistrationListQuery {
            status: params.status,
            limit: params.limit.map(|l| l as u32),
            offset: params.offset.map(|o| o as u64),
        };
        let result = client.list_registrations(&params.event_id, &query).await?;
        info!("Listed {} registration(s)", result.data.len());
        Ok(render_registration_list(&result.data, result.pagination.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::api::testing::MockTransport;
    use std::sync::Arc;
    use tokio_test::{assert_err, assert_ok};

    fn setup() -> (Arc<MockTransport>, EventLiteClient) {
        let mock = Arc::new(MockTransport::new());
        let client = EventLiteClient::with_transport("https://events.example.com", mock.clone());
        (mock, client)
    }

    #[tokio::test]
    async fn test_empty_registrations() {
        let (mock, client) = setup();
        mock.push_json(200, serde_json::json!({ "data": [] }));

        let text = assert_ok!(
            ListRegistrationsTool::call(serde_json::json!({ "eventId": "rust-meetup" }), &client)
                .await
        );
        assert_eq!(text, "No registrations found.");
    }

    #[tokio::test]
    async fn test_lists_with_more_results_marker() {
        let (mock, client) = setup();
        mock.push_json(200, serde_json::json!({
            "data": [{
                "id": "reg_1",
                "email": "ada@example.com",
                "name": "Ada Lovelace",
                "status": "CONFIRMED",
                "registered_at": "2025-02-01T10:30:00.000Z"
            }],
            "pagination": { "total": 2, "limit": 1, "offset": 0, "has_more": true }
        }));

        let args = serde_json::json!({ "eventId": "rust-meetup", "status": "CONFIRMED", "limit": 1 });
        let text = assert_ok!(ListRegistrationsTool::call(args, &client).await);
        assert!(text.starts_with("Found 1 registration(s):"));
        assert!(text.contains("- **Ada Lovelace** <ada@example.com> [CONFIRMED] - 01/02/2025"));
        assert!(text.ends_with("(More results available)"));
        assert_eq!(
            mock.paths(),
            vec!["/api/v1/events/rust-meetup/registrations?status=CONFIRMED&limit=1".to_string()]
        );
    }

    #[tokio::test]
    async fn test_unknown_status_rejected() {
        let (mock, client) = setup();
        let args = serde_json::json!({ "eventId": "rust-meetup", "status": "PENDING" });
        let err = assert_err!(ListRegistrationsTool::call(args, &client).await);
        assert!(matches!(err, ToolError::InvalidArguments(_)));
        assert_eq!(mock.call_count(), 0);
    }
}
