//! Core types for Crosspost

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum length of the content preview stored with a history entry
const PREVIEW_MAX_CHARS: usize = 200;

/// Content fields shared by publish, batch publish, and preview operations
#[derive(Debug, Clone, Default)]
pub struct PostContent {
    pub body: String,
    pub title: String,
    pub media_urls: Vec<String>,
    pub hashtags: Vec<String>,
    pub tags: Vec<String>,
}

impl PostContent {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Default::default()
        }
    }
}

/// Request to publish content to a single platform
#[derive(Debug, Clone)]
pub struct PublishRequest {
    pub platform: String,
    pub content: PostContent,
    /// ISO 8601 timestamp; a future instant defers the publish
    pub schedule_time: Option<String>,
}

/// Request to publish the same content to several platforms
#[derive(Debug, Clone)]
pub struct BatchPublishRequest {
    pub platforms: Vec<String>,
    pub content: PostContent,
    pub schedule_time: Option<String>,
}

/// Status label attached to publish results and stored records
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    Published,
    Scheduled,
    Failed,
}

impl std::fmt::Display for PublishStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Published => write!(f, "published"),
            Self::Scheduled => write!(f, "scheduled"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Outcome of one platform send attempt
///
/// Constructed through [`PublishResult::published`] and [`PublishResult::failed`]
/// so that success always carries a post id and URL, and failure always carries
/// an error message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResult {
    pub platform: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub status: PublishStatus,
}

impl PublishResult {
    /// Successful send with its platform-assigned identifiers
    pub fn published(platform: impl Into<String>, post_id: String, post_url: String) -> Self {
        Self {
            platform: platform.into(),
            success: true,
            post_id: Some(post_id),
            post_url: Some(post_url),
            error: None,
            status: PublishStatus::Published,
        }
    }

    /// Failed send with the reason
    pub fn failed(platform: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            success: false,
            post_id: None,
            post_url: None,
            error: Some(error.into()),
            status: PublishStatus::Failed,
        }
    }
}

/// Record of a completed publish, kept for history queries and analytics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Sequential, 1-based, process-lifetime identifier
    pub id: u64,
    pub platform: String,
    pub title: String,
    /// Body capped at 200 characters with an ellipsis marker
    pub content: String,
    pub post_url: String,
    pub post_id: String,
    pub status: PublishStatus,
    pub hashtags: Vec<String>,
    pub tags: Vec<String>,
    /// ISO 8601, UTC
    pub published_at: String,
}

/// History entry before the store has assigned its identifier
#[derive(Debug, Clone)]
pub struct NewHistoryEntry {
    pub platform: String,
    pub title: String,
    pub content: String,
    pub post_url: String,
    pub post_id: String,
    pub status: PublishStatus,
    pub hashtags: Vec<String>,
    pub tags: Vec<String>,
    pub published_at: String,
}

/// Cap a body to the stored preview length, marking truncation with an ellipsis
pub fn content_preview(body: &str) -> String {
    if body.chars().count() <= PREVIEW_MAX_CHARS {
        return body.to_string();
    }
    let mut preview: String = body.chars().take(PREVIEW_MAX_CHARS).collect();
    preview.push_str("...");
    preview
}

/// A publish deferred to a future timestamp
///
/// One entry covers every platform the deferred request targeted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPost {
    pub id: u64,
    pub platforms: Vec<String>,
    pub content: String,
    pub title: String,
    pub media_urls: Vec<String>,
    pub hashtags: Vec<String>,
    pub tags: Vec<String>,
    /// The requested timestamp, echoed as received
    pub schedule_time: String,
    pub status: PublishStatus,
    pub created_at: String,
}

/// Scheduled post before the store has assigned its identifier
#[derive(Debug, Clone)]
pub struct NewScheduledPost {
    pub platforms: Vec<String>,
    pub content: PostContent,
    pub schedule_time: String,
    /// Parsed instant the entry becomes due
    pub due_at: chrono::DateTime<chrono::Utc>,
    pub created_at: String,
}

/// Page of history entries plus the pagination bookkeeping callers echo back
#[derive(Debug, Clone)]
pub struct HistoryPage {
    pub items: Vec<HistoryEntry>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub has_more: bool,
}

/// Per-platform publish counts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    pub total_posts: usize,
    pub latest_post: Option<String>,
}

/// Aggregated view over the publish history and the scheduled queue
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub total_posts: usize,
    /// One row per registered platform, zero-count platforms included
    pub platform_stats: BTreeMap<String, PlatformStats>,
    /// Publishes per calendar date (first 10 characters of the timestamp)
    pub daily_stats: BTreeMap<String, usize>,
    pub scheduled_posts: usize,
}
