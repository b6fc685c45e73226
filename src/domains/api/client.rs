//! EventLite REST client.
//!
//! One method per remote endpoint. Each call performs exactly one request
//! through the configured [`ApiTransport`] and decodes the typed result.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{error, info};

use super::error::{ApiError, ApiResult};
use super::models::{
    ApiResponse, Event, EventCreateInput, EventStatus, EventUpdateInput, MessageResponse,
    NotificationInput, NotificationPreview, NotificationResult, Registration,
    RegistrationCreateInput, RegistrationDeletionResponse, RegistrationStatus, RegistrationUpdateInput,
    UploadedImage,
};
use super::transport::{ApiRequest, ApiTransport, HttpApiTransport};
use crate::core::config::ApiConfig;
use crate::core::{Error, Result};

const API_PREFIX: &str = "/api/v1";

/// Characters left untouched by JavaScript's `encodeURIComponent`.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a user-supplied identifier for use as a single path segment.
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Filters for `GET /events`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EventListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub upcoming: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
}

/// Filters for `GET /events/{id}/registrations`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RegistrationListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RegistrationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
}

impl EventListQuery {
    /// Drop falsy values (empty strings, zero) so they never reach the query string.
    fn normalized(&self) -> Self {
        Self {
            status: self.status,
            search: self.search.clone().filter(|s| !s.is_empty()),
            city: self.city.clone().filter(|s| !s.is_empty()),
            upcoming: self.upcoming,
            limit: self.limit.filter(|n| *n > 0),
            offset: self.offset.filter(|n| *n > 0),
        }
    }
}

impl RegistrationListQuery {
    fn normalized(&self) -> Self {
        Self {
            status: self.status,
            limit: self.limit.filter(|n| *n > 0),
            offset: self.offset.filter(|n| *n > 0),
        }
    }
}

/// Append `?query` to `path` when the query is non-empty.
fn with_query<Q: Serialize>(path: String, query: &Q) -> ApiResult<String> {
    let query = serde_urlencoded::to_string(query)?;
    if query.is_empty() {
        Ok(path)
    } else {
        Ok(format!("{}?{}", path, query))
    }
}

fn event_path(id_or_slug: &str) -> String {
    format!("{}/events/{}", API_PREFIX, encode_segment(id_or_slug))
}

fn registrations_path(event_id_or_slug: &str) -> String {
    format!("{}/registrations", event_path(event_id_or_slug))
}

fn registration_path(event_id_or_slug: &str, email: &str) -> String {
    format!(
        "{}/{}",
        registrations_path(event_id_or_slug),
        encode_segment(email)
    )
}

/// Client for the EventLite REST API.
///
/// Holds only immutable configuration; clones share the same transport.
#[derive(Clone)]
pub struct EventLiteClient {
    base_url: String,
    transport: Arc<dyn ApiTransport>,
}

impl std::fmt::Debug for EventLiteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLiteClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl EventLiteClient {
    /// Create a client using an explicit transport.
    pub fn with_transport(base_url: impl Into<String>, transport: Arc<dyn ApiTransport>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
        }
    }

    /// Create an HTTP client from configuration.
    ///
    /// Fails when no API key is configured.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::config("EVENTLITE_API_KEY environment variable is required"))?;

        let transport = HttpApiTransport::from_config(config, api_key)
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_transport(config.base_url.clone(), Arc::new(transport)))
    }

    /// Base URL of the EventLite instance (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Public page of an event.
    pub fn public_url(&self, slug: &str) -> String {
        format!("{}/e/{}", self.base_url, slug)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: String,
        body: Option<serde_json::Value>,
    ) -> ApiResult<T> {
        info!("{} {}", method, path);

        let reply = self
            .transport
            .send(ApiRequest { method, path, body })
            .await?;

        if !reply.is_success() {
            let err = ApiError::from_response(reply.status, &reply.body);
            error!("EventLite request failed: {}", err);
            return Err(err);
        }

        // 204 No Content decodes as an empty object
        let body = if reply.body.trim().is_empty() {
            "{}"
        } else {
            reply.body.as_str()
        };
        Ok(serde_json::from_str(body)?)
    }

    fn body<B: Serialize>(input: &B) -> ApiResult<Option<serde_json::Value>> {
        Ok(Some(serde_json::to_value(input)?))
    }

    // ==================== EVENTS ====================

    pub async fn list_events(&self, query: &EventListQuery) -> ApiResult<ApiResponse<Vec<Event>>> {
        let path = with_query(format!("{}/events", API_PREFIX), &query.normalized())?;
        self.request(Method::GET, path, None).await
    }

    pub async fn get_event(&self, id_or_slug: &str) -> ApiResult<ApiResponse<Event>> {
        self.request(Method::GET, event_path(id_or_slug), None).await
    }

    pub async fn create_event(&self, input: &EventCreateInput) -> ApiResult<ApiResponse<Event>> {
        let path = format!("{}/events", API_PREFIX);
        self.request(Method::POST, path, Self::body(input)?).await
    }

    pub async fn update_event(
        &self,
        id_or_slug: &str,
        input: &EventUpdateInput,
    ) -> ApiResult<ApiResponse<Event>> {
        self.request(Method::PATCH, event_path(id_or_slug), Self::body(input)?)
            .await
    }

    pub async fn delete_event(&self, id_or_slug: &str) -> ApiResult<MessageResponse> {
        self.request(Method::DELETE, event_path(id_or_slug), None)
            .await
    }

    // ==================== REGISTRATIONS ====================

    pub async fn list_registrations(
        &self,
        event_id_or_slug: &str,
        query: &RegistrationListQuery,
    ) -> ApiResult<ApiResponse<Vec<Registration>>> {
        let path = with_query(registrations_path(event_id_or_slug), &query.normalized())?;
        self.request(Method::GET, path, None).await
    }

    pub async fn get_registration(
        &self,
        event_id_or_slug: &str,
        email: &str,
    ) -> ApiResult<ApiResponse<Registration>> {
        self.request(
            Method::GET,
            registration_path(event_id_or_slug, email),
            None,
        )
        .await
    }

    pub async fn create_registration(
        &self,
        event_id_or_slug: &str,
        input: &RegistrationCreateInput,
    ) -> ApiResult<ApiResponse<Registration>> {
        self.request(
            Method::POST,
            registrations_path(event_id_or_slug),
            Self::body(input)?,
        )
        .await
    }

    pub async fn update_registration(
        &self,
        event_id_or_slug: &str,
        email: &str,
        input: &RegistrationUpdateInput,
    ) -> ApiResult<ApiResponse<Registration>> {
        self.request(
            Method::PATCH,
            registration_path(event_id_or_slug, email),
            Self::body(input)?,
        )
        .await
    }

    /// Cancel a registration. The response may name a promoted waitlist attendee.
    pub async fn delete_registration(
        &self,
        event_id_or_slug: &str,
        email: &str,
    ) -> ApiResult<RegistrationDeletionResponse> {
        self.request(
            Method::DELETE,
            registration_path(event_id_or_slug, email),
            None,
        )
        .await
    }

    // ==================== NOTIFICATIONS ====================

    pub async fn send_notification(
        &self,
        event_id_or_slug: &str,
        input: &NotificationInput,
    ) -> ApiResult<ApiResponse<NotificationResult>> {
        let path = format!("{}/notify", event_path(event_id_or_slug));
        self.request(Method::POST, path, Self::body(input)?).await
    }

    /// Same endpoint with `?preview=true`: the service only counts recipients.
    pub async fn preview_notification(
        &self,
        event_id_or_slug: &str,
        input: &NotificationInput,
    ) -> ApiResult<ApiResponse<NotificationPreview>> {
        let path = format!("{}/notify?preview=true", event_path(event_id_or_slug));
        self.request(Method::POST, path, Self::body(input)?).await
    }

    // ==================== UPLOAD ====================

    pub async fn upload_image_from_url(&self, image_url: &str) -> ApiResult<ApiResponse<UploadedImage>> {
        let path = format!("{}/upload", API_PREFIX);
        let body = serde_json::json!({ "url": image_url });
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn upload_image_from_base64(
        &self,
        base64_data: &str,
    ) -> ApiResult<ApiResponse<UploadedImage>> {
        let path = format!("{}/upload", API_PREFIX);
        let body = serde_json::json!({ "base64": base64_data });
        self.request(Method::POST, path, Some(body)).await
    }

    /// Download an image from a third-party URL.
    pub async fn fetch_image(&self, url: &str) -> ApiResult<Vec<u8>> {
        info!("Fetching source image: {}", url);
        self.transport.fetch(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::api::models::{EventMode, NotificationTarget};
    use crate::domains::api::testing::{MockTransport, event_json};
    use tokio_test::{assert_err, assert_ok};

    fn client(mock: &Arc<MockTransport>) -> EventLiteClient {
        EventLiteClient::with_transport("https://events.example.com/", mock.clone())
    }

    #[test]
    fn test_encode_segment_matches_uri_component() {
        assert_eq!(encode_segment("rust-meetup_2025"), "rust-meetup_2025");
        assert_eq!(encode_segment("a/b c"), "a%2Fb%20c");
        assert_eq!(encode_segment("john+doe@example.com"), "john%2Bdoe%40example.com");
        assert_eq!(encode_segment("it's(ok)!*~"), "it's(ok)!*~");
        assert_eq!(encode_segment("café"), "caf%C3%A9");
    }

    #[tokio::test]
    async fn test_list_events_omits_absent_query_params() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(200, serde_json::json!({ "data": [] }));

        let result = assert_ok!(client(&mock).list_events(&EventListQuery::default()).await);
        assert!(result.data.is_empty());
        assert_eq!(mock.paths(), vec!["/api/v1/events".to_string()]);
    }

    #[tokio::test]
    async fn test_list_events_builds_query_in_order() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(200, serde_json::json!({ "data": [] }));

        let query = EventListQuery {
            status: Some(EventStatus::Published),
            search: Some("rust lyon".to_string()),
            city: Some(String::new()),
            upcoming: true,
            limit: Some(10),
            offset: Some(0),
        };
        assert_ok!(client(&mock).list_events(&query).await);

        assert_eq!(
            mock.paths(),
            vec!["/api/v1/events?status=PUBLISHED&search=rust+lyon&upcoming=true&limit=10".to_string()]
        );
    }

    #[tokio::test]
    async fn test_identifiers_are_percent_encoded_in_paths() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(200, serde_json::json!({ "data": event_json("a/b c", "Title") }));
        mock.push_json(
            200,
            serde_json::json!({ "data": { "message": "Registration cancelled" } }),
        );

        let client = client(&mock);
        assert_ok!(client.get_event("a/b c").await);
        assert_ok!(
            client
                .delete_registration("team+ops", "jane doe+events@example.com")
                .await
        );

        let requests = mock.requests();
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(requests[0].path, "/api/v1/events/a%2Fb%20c");
        assert_eq!(requests[1].method, Method::DELETE);
        assert_eq!(
            requests[1].path,
            "/api/v1/events/team%2Bops/registrations/jane%20doe%2Bevents%40example.com"
        );
    }

    #[tokio::test]
    async fn test_create_event_sends_camel_case_body() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(201, serde_json::json!({ "data": event_json("rust-meetup", "Rust Meetup") }));

        let input = EventCreateInput {
            title: "Rust Meetup".to_string(),
            subtitle: None,
            description: None,
            cover_image: None,
            mode: EventMode::InPerson,
            location: Some("Lyon".to_string()),
            latitude: None,
            longitude: None,
            start_at: "2025-02-15T19:00:00.000Z".to_string(),
            end_at: None,
            capacity: Some(40),
            waitlist: None,
            status: None,
        };
        let created = assert_ok!(client(&mock).create_event(&input).await);
        assert_eq!(created.data.slug, "rust-meetup");

        let requests = mock.requests();
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].path, "/api/v1/events");
        assert_eq!(
            requests[0].body,
            Some(serde_json::json!({
                "title": "Rust Meetup",
                "mode": "IN_PERSON",
                "location": "Lyon",
                "startAt": "2025-02-15T19:00:00.000Z",
                "capacity": 40
            }))
        );
    }

    #[tokio::test]
    async fn test_registration_update_and_get_paths() {
        let mock = Arc::new(MockTransport::new());
        let registration = serde_json::json!({
            "id": "reg_1",
            "email": "ada@example.com",
            "name": "Ada Lovelace",
            "status": "CONFIRMED",
            "registered_at": "2025-01-10T08:00:00.000Z",
            "event": { "id": "evt_1", "title": "Rust Meetup", "slug": "rust-meetup" }
        });
        mock.push_json(200, serde_json::json!({ "data": registration.clone() }));
        mock.push_json(200, serde_json::json!({ "data": registration }));

        let client = client(&mock);
        let fetched = assert_ok!(client.get_registration("rust-meetup", "ada@example.com").await);
        assert_eq!(fetched.data.event.unwrap().slug, "rust-meetup");

        let update = RegistrationUpdateInput {
            notes: Some("Vegetarian".to_string()),
            ..Default::default()
        };
        assert_ok!(
            client
                .update_registration("rust-meetup", "ada@example.com", &update)
                .await
        );

        let requests = mock.requests();
        assert_eq!(requests[0].path, "/api/v1/events/rust-meetup/registrations/ada%40example.com");
        assert_eq!(requests[1].method, Method::PATCH);
        assert_eq!(requests[1].body, Some(serde_json::json!({ "notes": "Vegetarian" })));
    }

    #[tokio::test]
    async fn test_list_registrations_query() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(200, serde_json::json!({ "data": [] }));

        let query = RegistrationListQuery {
            status: Some(RegistrationStatus::Waitlist),
            limit: Some(25),
            offset: Some(50),
        };
        assert_ok!(client(&mock).list_registrations("rust-meetup", &query).await);
        assert_eq!(
            mock.paths(),
            vec!["/api/v1/events/rust-meetup/registrations?status=WAITLIST&limit=25&offset=50".to_string()]
        );
    }

    #[tokio::test]
    async fn test_preview_notification_adds_flag() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(200, serde_json::json!({ "data": { "total": 3 } }));

        let input = NotificationInput {
            subject: "Reminder".to_string(),
            message: "See you tomorrow".to_string(),
            target: Some(NotificationTarget::Confirmed),
            include_event_details: None,
        };
        let preview = assert_ok!(client(&mock).preview_notification("rust-meetup", &input).await);
        assert_eq!(preview.data.recipient_count(), 3);

        let requests = mock.requests();
        assert_eq!(requests[0].path, "/api/v1/events/rust-meetup/notify?preview=true");
        assert_eq!(
            requests[0].body,
            Some(serde_json::json!({
                "subject": "Reminder",
                "message": "See you tomorrow",
                "target": "confirmed"
            }))
        );
    }

    #[tokio::test]
    async fn test_error_status_carries_server_message() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(404, serde_json::json!({ "error": "Event not found" }));

        let err = assert_err!(client(&mock).get_event("missing").await);
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Event not found");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_status_without_body_falls_back() {
        let mock = Arc::new(MockTransport::new());
        mock.push_raw(500, "");

        let err = assert_err!(client(&mock).delete_event("evt_1").await);
        assert_eq!(err.to_string(), "HTTP 500");
    }

    #[test]
    fn test_public_url_uses_trimmed_base() {
        let mock = Arc::new(MockTransport::new());
        assert_eq!(
            client(&mock).public_url("rust-meetup"),
            "https://events.example.com/e/rust-meetup"
        );
    }

    #[test]
    fn test_from_config_requires_api_key() {
        let config = ApiConfig {
            base_url: "http://localhost:3000".to_string(),
            api_key: None,
            timeout_secs: 30,
        };
        let err = EventLiteClient::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("EVENTLITE_API_KEY"));
    }
}
