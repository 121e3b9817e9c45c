//! Publishing service for single, batch, and deferred dispatch
//!
//! This module owns the orchestration: validating the target platform,
//! deferring requests with a future schedule time, formatting content,
//! invoking the platform's publisher, and recording successful sends in
//! the history store.

use chrono::{SecondsFormat, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{CrosspostError, PlatformError, Result};
use crate::formatter;
use crate::platforms::{PublishReceipt, Publisher};
use crate::registry::{PlatformConfig, PlatformRegistry};
use crate::scheduling;
use crate::store::{HistoryStore, ScheduleStore};
use crate::types::{
    content_preview, BatchPublishRequest, NewHistoryEntry, NewScheduledPost, PostContent,
    PublishRequest, PublishResult, PublishStatus,
};

/// Publishing service
///
/// Dispatch within a call is sequential: one platform's failure is recorded
/// and the remaining platforms still run.
#[derive(Clone)]
pub struct PublishingService {
    registry: Arc<PlatformRegistry>,
    publishers: Arc<HashMap<String, Arc<dyn Publisher>>>,
    history: Arc<dyn HistoryStore>,
    schedule: Arc<dyn ScheduleStore>,
}

/// Outcome of a single-platform publish request
#[derive(Debug, Clone)]
pub enum PublishOutcome {
    Published(PublishedPost),
    Scheduled(ScheduledConfirmation),
}

/// A completed immediate publish
#[derive(Debug, Clone)]
pub struct PublishedPost {
    pub platform: String,
    pub post_id: String,
    pub post_url: String,
    pub message: String,
    pub published_at: String,
}

/// Confirmation that a request was deferred instead of dispatched
#[derive(Debug, Clone)]
pub struct ScheduledConfirmation {
    pub scheduled_id: u64,
    pub schedule_time: String,
    pub message: String,
}

/// Outcome of a batch publish request
#[derive(Debug, Clone)]
pub enum BatchOutcome {
    Dispatched {
        results: Vec<PublishResult>,
        summary: BatchSummary,
        message: String,
    },
    Scheduled(ScheduledConfirmation),
}

/// Success and failure counts for a batch
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total_platforms: usize,
    pub successful: usize,
    pub failed: usize,
}

impl PublishingService {
    pub fn new(
        registry: Arc<PlatformRegistry>,
        publishers: Arc<HashMap<String, Arc<dyn Publisher>>>,
        history: Arc<dyn HistoryStore>,
        schedule: Arc<dyn ScheduleStore>,
    ) -> Self {
        Self {
            registry,
            publishers,
            history,
            schedule,
        }
    }

    /// Publish content to one platform, or defer it
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Unsupported` for unknown platforms,
    /// `CrosspostError::InvalidInput` for an unparseable schedule time, and
    /// the sender's error when immediate dispatch fails.
    pub async fn publish(&self, request: PublishRequest) -> Result<PublishOutcome> {
        let platform = self
            .registry
            .get(&request.platform)
            .ok_or_else(|| PlatformError::Unsupported(request.platform.clone()))?
            .clone();

        let targets = vec![platform.id.clone()];
        if let Some(confirmation) = self
            .try_schedule(&targets, &request.content, request.schedule_time.as_deref())
            .await?
        {
            return Ok(PublishOutcome::Scheduled(confirmation));
        }

        let operation = uuid::Uuid::new_v4();
        info!(%operation, platform = %platform.id, "publishing content");

        let receipt = self.send(&platform, &request.content).await?;
        let published_at = self.record_success(&platform, &request.content, &receipt).await;

        Ok(PublishOutcome::Published(PublishedPost {
            platform: platform.id.clone(),
            post_id: receipt.post_id,
            post_url: receipt.post_url,
            message: format!("Successfully published to {}", platform.name),
            published_at,
        }))
    }

    /// Publish the same content to several platforms, or defer them all
    ///
    /// Per-platform results preserve the input order. An unknown platform
    /// becomes a failure result without a dispatch attempt and never aborts
    /// the rest of the batch.
    ///
    /// # Errors
    ///
    /// Returns `CrosspostError::InvalidInput` only for an unparseable
    /// schedule time; dispatch failures are captured per platform.
    pub async fn publish_batch(&self, request: BatchPublishRequest) -> Result<BatchOutcome> {
        if let Some(confirmation) = self
            .try_schedule(
                &request.platforms,
                &request.content,
                request.schedule_time.as_deref(),
            )
            .await?
        {
            return Ok(BatchOutcome::Scheduled(confirmation));
        }

        let operation = uuid::Uuid::new_v4();
        info!(
            %operation,
            platforms = request.platforms.len(),
            "publishing batch"
        );

        let mut results = Vec::with_capacity(request.platforms.len());
        for id in &request.platforms {
            match self.registry.get(id) {
                None => {
                    warn!(platform = %id, "skipping unsupported platform");
                    results.push(PublishResult::failed(
                        id,
                        PlatformError::Unsupported(id.clone()).to_string(),
                    ));
                }
                Some(platform) => {
                    let platform = platform.clone();
                    results.push(self.dispatch(&platform, &request.content).await);
                }
            }
        }

        let successful = results.iter().filter(|r| r.success).count();
        let total = request.platforms.len();
        let summary = BatchSummary {
            total_platforms: total,
            successful,
            failed: total - successful,
        };
        let message = format!("Published to {}/{} platforms", successful, total);

        Ok(BatchOutcome::Dispatched {
            results,
            summary,
            message,
        })
    }

    /// Render content as the platform would receive it
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Unsupported` for unknown platforms.
    pub fn preview(&self, platform: &str, content: &PostContent) -> Result<(String, PlatformConfig)> {
        let platform = self
            .registry
            .get(platform)
            .ok_or_else(|| PlatformError::Unsupported(platform.to_string()))?;

        let preview = formatter::format_for_platform(
            platform,
            &content.title,
            &content.body,
            &content.media_urls,
            &content.hashtags,
        );
        Ok((preview, platform.clone()))
    }

    /// Drain due scheduled posts and publish each of their platforms
    ///
    /// Failures are captured per platform exactly as in a batch; nothing is
    /// retried or put back in the queue.
    pub async fn promote_due(&self) -> Vec<PublishResult> {
        let due = self.schedule.take_due(Utc::now()).await;
        if due.is_empty() {
            return Vec::new();
        }

        info!(count = due.len(), "promoting due scheduled posts");

        let mut results = Vec::new();
        for post in due {
            let content = PostContent {
                body: post.content,
                title: post.title,
                media_urls: post.media_urls,
                hashtags: post.hashtags,
                tags: post.tags,
            };
            for id in &post.platforms {
                match self.registry.get(id) {
                    None => results.push(PublishResult::failed(
                        id,
                        PlatformError::Unsupported(id.clone()).to_string(),
                    )),
                    Some(platform) => {
                        let platform = platform.clone();
                        results.push(self.dispatch(&platform, &content).await);
                    }
                }
            }
        }
        results
    }

    /// Store a scheduled entry when the request carries a future schedule time
    async fn try_schedule(
        &self,
        platforms: &[String],
        content: &PostContent,
        schedule_time: Option<&str>,
    ) -> Result<Option<ScheduledConfirmation>> {
        let Some(raw) = schedule_time.filter(|s| !s.is_empty()) else {
            return Ok(None);
        };

        let due_at = scheduling::parse_schedule_time(raw)?;
        let now = Utc::now();
        if !scheduling::is_future(due_at, now) {
            // A past instant publishes immediately
            return Ok(None);
        }

        let scheduled = self
            .schedule
            .add(NewScheduledPost {
                platforms: platforms.to_vec(),
                content: content.clone(),
                schedule_time: raw.to_string(),
                due_at,
                created_at: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            })
            .await;

        info!(
            scheduled_id = scheduled.id,
            schedule_time = %scheduled.schedule_time,
            "deferred publish"
        );

        Ok(Some(ScheduledConfirmation {
            scheduled_id: scheduled.id,
            schedule_time: scheduled.schedule_time.clone(),
            message: format!("Content scheduled for {}", scheduled.platforms.join(", ")),
        }))
    }

    /// Format and send to one platform's publisher
    async fn send(&self, platform: &PlatformConfig, content: &PostContent) -> Result<PublishReceipt> {
        let formatted = formatter::format_for_platform(
            platform,
            &content.title,
            &content.body,
            &content.media_urls,
            &content.hashtags,
        );

        let publisher = self
            .publishers
            .get(&platform.id)
            .ok_or_else(|| PlatformError::NotImplemented(platform.id.clone()))?;

        publisher.publish(&formatted).await
    }

    /// Send to one platform, converting the outcome to a result and recording
    /// successes in the history store
    async fn dispatch(&self, platform: &PlatformConfig, content: &PostContent) -> PublishResult {
        match self.send(platform, content).await {
            Ok(receipt) => {
                info!(platform = %platform.id, post_id = %receipt.post_id, "published");
                let result = PublishResult::published(
                    &platform.id,
                    receipt.post_id.clone(),
                    receipt.post_url.clone(),
                );
                self.record_success(platform, content, &receipt).await;
                result
            }
            Err(e) => {
                warn!(platform = %platform.id, error = %e, "publish failed");
                PublishResult::failed(&platform.id, error_message(&e))
            }
        }
    }

    /// Append a history entry for a successful send, returning its timestamp
    async fn record_success(
        &self,
        platform: &PlatformConfig,
        content: &PostContent,
        receipt: &PublishReceipt,
    ) -> String {
        let published_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        self.history
            .append(NewHistoryEntry {
                platform: platform.id.clone(),
                title: content.title.clone(),
                content: content_preview(&content.body),
                post_url: receipt.post_url.clone(),
                post_id: receipt.post_id.clone(),
                status: PublishStatus::Published,
                hashtags: content.hashtags.clone(),
                tags: content.tags.clone(),
                published_at: published_at.clone(),
            })
            .await;
        published_at
    }
}

/// The message callers see for a failed send, without the outer error wrapper
fn error_message(error: &CrosspostError) -> String {
    match error {
        CrosspostError::Platform(platform_error) => platform_error.to_string(),
        other => other.to_string(),
    }
}
