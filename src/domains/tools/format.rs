//! Rendering of API results into display text.
//!
//! Pure functions: typed API data in, Markdown-flavoured text out. Dates are
//! localized to French and rendered in UTC.

use chrono::{DateTime, Locale, Utc};

use crate::domains::api::models::{
    Event, EventStatus, NotificationPreview, NotificationResult, Pagination, PromotedAttendee,
    Registration, RegistrationStatus, UploadedImage, DeliveryStatus,
};

const DATE_LOCALE: Locale = Locale::fr_FR;

/// Reminder appended whenever an event ends up as a draft.
pub const PUBLISH_HINT: &str = "To publish it, use update_event with status: \"PUBLISHED\"";

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn localized(value: &str, pattern: &str) -> String {
    match parse_timestamp(value) {
        Some(dt) => dt.format_localized(pattern, DATE_LOCALE).to_string(),
        None => value.to_string(),
    }
}

/// `samedi 15 février à 19:00`
pub fn format_event_date(value: &str) -> String {
    localized(value, "%A %-d %B à %H:%M")
}

/// `samedi 15 février 2025 à 19:00`
pub fn format_event_date_long(value: &str) -> String {
    localized(value, "%A %-d %B %Y à %H:%M")
}

/// `15/02/2025`
pub fn format_short_date(value: &str) -> String {
    localized(value, "%d/%m/%Y")
}

/// Public page of an event.
pub fn public_url(base_url: &str, slug: &str) -> String {
    format!("{}/e/{}", base_url.trim_end_matches('/'), slug)
}

/// Render a failure message with the error marker.
pub fn render_error(message: &str) -> String {
    format!("❌ Error: {}", message)
}

// ============================================================================
// Events
// ============================================================================

pub fn render_event_list(events: &[Event], base_url: &str) -> String {
    if events.is_empty() {
        return "No events found.".to_string();
    }

    let summary = events
        .iter()
        .map(|e| {
            let confirmed = e.confirmed_count.unwrap_or(0);
            let capacity = match e.capacity {
                Some(capacity) if capacity > 0 => format!("{}/{}", confirmed, capacity),
                _ => format!("{} inscrits", confirmed),
            };
            format!(
                "- **{}** ({})\n  📅 {}\n  👥 {}\n  🔗 {}",
                e.title,
                e.status,
                format_event_date(&e.start_at),
                capacity,
                public_url(base_url, &e.slug)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("Found {} event(s):\n\n{}", events.len(), summary)
}

pub fn render_event_detail(e: &Event, base_url: &str) -> String {
    let confirmed = e.confirmed_count.unwrap_or(0);
    let capacity = e
        .capacity
        .filter(|c| *c > 0)
        .map(|c| format!(" / {} capacity", c))
        .unwrap_or_default();

    let lines = [
        Some(format!("# {}", e.title)),
        e.subtitle
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| format!("*{}*", s)),
        Some(format!("**Status:** {}", e.status)),
        Some(format!("**Mode:** {}", e.mode)),
        Some(format!("**Date:** {}", format_event_date_long(&e.start_at))),
        e.location
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|l| format!("**Location:** {}", l)),
        Some(format!("**Registrations:** {} confirmed{}", confirmed, capacity)),
        e.waitlist_count
            .filter(|n| *n > 0)
            .map(|n| format!("**Waitlist:** {}", n)),
        Some(format!("**Public URL:** {}", public_url(base_url, &e.slug))),
        Some(format!("**Slug:** {}", e.slug)),
        Some(format!("**ID:** {}", e.id)),
    ];

    lines.into_iter().flatten().collect::<Vec<_>>().join("\n")
}

fn with_publish_hint(mut text: String, status: EventStatus) -> String {
    if status == EventStatus::Draft {
        text.push_str("\n\n");
        text.push_str(PUBLISH_HINT);
    }
    text
}

pub fn render_event_created(e: &Event, base_url: &str) -> String {
    let text = format!(
        "✅ Event created successfully!\n\n**Title:** {}\n**URL:** {}\n**Status:** {}\n**ID:** {}",
        e.title,
        public_url(base_url, &e.slug),
        e.status,
        e.id
    );
    with_publish_hint(text, e.status)
}

pub fn render_event_updated(e: &Event) -> String {
    let text = format!(
        "✅ Event updated successfully!\n\n**Title:** {}\n**Status:** {}\n**Slug:** {}",
        e.title, e.status, e.slug
    );
    with_publish_hint(text, e.status)
}

pub fn render_event_deleted() -> String {
    "✅ Event deleted successfully.".to_string()
}

// ============================================================================
// Registrations
// ============================================================================

pub fn render_registration_list(
    registrations: &[Registration],
    pagination: Option<&Pagination>,
) -> String {
    if registrations.is_empty() {
        return "No registrations found.".to_string();
    }

    let summary = registrations
        .iter()
        .map(|r| {
            format!(
                "- **{}** <{}> [{}] - {}",
                r.name,
                r.email,
                r.status,
                format_short_date(&r.registered_at)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let mut text = format!(
        "Found {} registration(s):\n\n{}",
        registrations.len(),
        summary
    );
    if pagination.is_some_and(|p| p.has_more) {
        text.push_str("\n\n(More results available)");
    }
    text
}

pub fn render_registration_created(r: &Registration) -> String {
    let mut text = format!(
        "✅ Registration successful!\n\n**Name:** {}\n**Email:** {}\n**Status:** {}",
        r.name, r.email, r.status
    );
    if r.status == RegistrationStatus::Waitlist {
        text.push_str("\n\nThe event is full: the attendee has been added to the waitlist.");
    }
    text
}

pub fn render_registration_cancelled(email: &str, promoted: Option<&PromotedAttendee>) -> String {
    let mut text = format!("✅ Registration cancelled for {}", email);
    if let Some(p) = promoted {
        text.push_str(&format!(
            "\n\n📤 {} <{}> has been promoted from waitlist to confirmed.",
            p.name, p.email
        ));
    }
    text
}

// ============================================================================
// Notifications & uploads
// ============================================================================

pub fn render_notification_preview(
    preview: &NotificationPreview,
    target: &str,
    subject: &str,
    message: &str,
) -> String {
    format!(
        "📧 **Preview Mode** - No emails sent\n\n**Recipients:** {} {}\n**Subject:** {}\n**Message:**\n{}",
        preview.recipient_count(),
        target,
        subject,
        message
    )
}

pub fn render_notification_sent(result: &NotificationResult) -> String {
    let mut text = format!(
        "📧 Notification sent!\n\n**Sent:** {}\n**Failed:** {}\n**Target:** {}",
        result.sent, result.failed, result.target
    );

    let failures: Vec<String> = result
        .details
        .iter()
        .filter(|d| d.status == DeliveryStatus::Failed)
        .map(|d| match &d.error {
            Some(error) => format!("- {}: {}", d.email, error),
            None => format!("- {}", d.email),
        })
        .collect();

    if !failures.is_empty() {
        text.push_str("\n\n**Failures:**\n");
        text.push_str(&failures.join("\n"));
    }
    text
}

pub fn render_upload(image: &UploadedImage) -> String {
    format!(
        "✅ Image uploaded successfully!\n\n**URL:** {}\n\nYou can now use this URL as the `coverImage` when creating or updating an event.",
        image.url
    )
}
