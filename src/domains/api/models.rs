//! Wire types for the EventLite REST API.
//!
//! Response types mirror the JSON the service sends back. Request types are
//! serialized with absent options omitted so partial updates only touch the
//! fields the caller supplied.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Enumerations
// ============================================================================

/// Publication status of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Draft,
    Published,
    Closed,
    Cancelled,
}

/// Status accepted when creating an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InitialEventStatus {
    Draft,
    Published,
}

/// Whether an event happens online or at a physical location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventMode {
    Online,
    InPerson,
}

/// Status of a single registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationStatus {
    Confirmed,
    Waitlist,
    Cancelled,
}

/// Audience of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotificationTarget {
    All,
    Confirmed,
    Waitlist,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Published => "PUBLISHED",
            Self::Closed => "CLOSED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl From<InitialEventStatus> for EventStatus {
    fn from(status: InitialEventStatus) -> Self {
        match status {
            InitialEventStatus::Draft => Self::Draft,
            InitialEventStatus::Published => Self::Published,
        }
    }
}

impl EventMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "ONLINE",
            Self::InPerson => "IN_PERSON",
        }
    }
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "CONFIRMED",
            Self::Waitlist => "WAITLIST",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl NotificationTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Confirmed => "confirmed",
            Self::Waitlist => "waitlist",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for EventMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for NotificationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Envelopes
// ============================================================================

/// Standard `{data, pagination?}` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
    pub has_more: bool,
}

/// Plain `{message}` acknowledgement returned by deletions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

// ============================================================================
// Events
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    pub mode: EventMode,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    pub start_at: String,
    #[serde(default)]
    pub end_at: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub waitlist: bool,
    pub status: EventStatus,
    #[serde(default)]
    pub organizer_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, rename = "confirmed_count")]
    pub confirmed_count: Option<u32>,
    #[serde(default, rename = "waitlist_count")]
    pub waitlist_count: Option<u32>,
    #[serde(default, rename = "total_registrations")]
    pub total_registrations: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCreateInput {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub mode: EventMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub start_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waitlist: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InitialEventStatus>,
}

/// Partial event update. `cover_image: Some(None)` is sent as `null` to clear it.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventUpdateInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<EventMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waitlist: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
}

// ============================================================================
// Registrations
// ============================================================================

/// Back-reference to the event a registration belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct EventSummary {
    pub id: String,
    pub title: String,
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub status: RegistrationStatus,
    pub registered_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub event: Option<EventSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegistrationCreateInput {
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RegistrationUpdateInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RegistrationStatus>,
}

/// Attendee moved from the waitlist after a cancellation.
#[derive(Debug, Clone, Deserialize)]
pub struct PromotedAttendee {
    pub email: String,
    pub name: String,
}

/// Envelope of a registration cancellation. An empty 2xx body has no `data`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationDeletionResponse {
    #[serde(default)]
    pub data: Option<RegistrationDeletion>,
}

/// Body of `DELETE /events/{id}/registrations/{email}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationDeletion {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub promoted: Option<PromotedAttendee>,
}

// ============================================================================
// Notifications
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationInput {
    pub subject: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<NotificationTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_event_details: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Sent,
    Failed,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryDetail {
    pub email: String,
    pub status: DeliveryStatus,
    #[serde(default)]
    pub error: Option<String>,
}

/// Outcome of a real (non-preview) notification send.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationResult {
    pub sent: u32,
    pub failed: u32,
    pub target: String,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub details: Vec<DeliveryDetail>,
}

/// Outcome of a preview-mode notification (nothing delivered).
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationPreview {
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub recipients_count: Option<u32>,
}

impl NotificationPreview {
    /// Intended recipient count: `total` when non-zero, else `recipients_count`.
    pub fn recipient_count(&self) -> u32 {
        self.total
            .filter(|n| *n > 0)
            .or(self.recipients_count)
            .or(self.total)
            .unwrap_or(0)
    }
}

// ============================================================================
// Upload
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct UploadedImage {
    pub url: String,
    #[serde(default)]
    pub pathname: Option<String>,
}
