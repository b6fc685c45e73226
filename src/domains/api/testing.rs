//! Recording transport used by unit tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::error::{ApiError, ApiResult};
use super::transport::{ApiReply, ApiRequest, ApiTransport};

/// Replays queued replies and records every request it receives.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<ApiReply>>,
    requests: Mutex<Vec<ApiRequest>>,
    images: Mutex<VecDeque<ApiResult<Vec<u8>>>>,
    fetched: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_json(&self, status: u16, body: serde_json::Value) {
        self.push_raw(status, &body.to_string());
    }

    pub fn push_raw(&self, status: u16, body: &str) {
        self.replies.lock().unwrap().push_back(ApiReply {
            status,
            body: body.to_string(),
        });
    }

    pub fn push_image(&self, result: ApiResult<Vec<u8>>) {
        self.images.lock().unwrap().push_back(result);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }

    /// Total outbound calls, API requests and image downloads combined.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len() + self.fetched.lock().unwrap().len()
    }
}

#[async_trait]
impl ApiTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiReply> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ApiError::request("no reply queued"))
    }

    async fn fetch(&self, url: &str) -> ApiResult<Vec<u8>> {
        self.fetched.lock().unwrap().push(url.to_string());
        self.images
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::request("no image queued")))
    }
}

/// Minimal event payload as returned by the service.
pub fn event_json(slug: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": format!("evt_{}", slug.len()),
        "slug": slug,
        "title": title,
        "mode": "ONLINE",
        "startAt": "2025-02-15T19:00:00.000Z",
        "endAt": "2025-02-15T21:00:00.000Z",
        "timezone": "Europe/Paris",
        "waitlist": true,
        "status": "DRAFT",
        "organizerId": "org_1",
        "confirmed_count": 0,
        "waitlist_count": 0
    })
}
