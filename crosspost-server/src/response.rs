//! Response bodies and error mapping for the publisher API

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

use libcrosspost::error::{CrosspostError, PlatformError};
use libcrosspost::registry::PlatformConfig;
use libcrosspost::service::BatchSummary;
use libcrosspost::types::{AnalyticsReport, HistoryEntry, PublishResult, ScheduledPost};

/// API error carrying the status code and the message body
///
/// Every error leaves the server as `{"error": message}` with a non-2xx
/// status. Validation problems are client errors; sender failures are server
/// errors.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<CrosspostError> for ApiError {
    fn from(error: CrosspostError) -> Self {
        let status = match &error {
            CrosspostError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            CrosspostError::Platform(PlatformError::Unsupported(_)) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = match error {
            CrosspostError::Platform(platform_error) => platform_error.to_string(),
            CrosspostError::InvalidInput(message) => message,
            other => other.to_string(),
        };
        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformsResponse {
    pub success: bool,
    pub platforms: Vec<PlatformConfig>,
    pub total_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedResponse {
    pub success: bool,
    pub platform: String,
    pub post_url: String,
    pub post_id: String,
    pub message: String,
    pub published_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledResponse {
    pub success: bool,
    pub message: String,
    pub scheduled_id: u64,
    pub schedule_time: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    pub success: bool,
    pub results: Vec<PublishResult>,
    pub summary: BatchSummary,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub success: bool,
    pub platform: String,
    pub preview: String,
    pub platform_info: PlatformConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub has_more: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub success: bool,
    pub history: Vec<HistoryEntry>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledListResponse {
    pub success: bool,
    pub scheduled_posts: Vec<ScheduledPost>,
    pub total_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub success: bool,
    pub analytics: AnalyticsReport,
    pub generated_at: String,
}
