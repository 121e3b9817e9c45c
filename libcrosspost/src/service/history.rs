//! History service for querying past publishes and the scheduled queue
//!
//! Read-side companion to the publishing service: paginated history,
//! scheduled post listing and cancellation, and the aggregated analytics
//! view.

use std::sync::Arc;
use tracing::info;

use crate::registry::PlatformRegistry;
use crate::store::{HistoryStore, ScheduleStore};
use crate::types::{AnalyticsReport, HistoryPage, ScheduledPost};

/// History service
#[derive(Clone)]
pub struct HistoryService {
    registry: Arc<PlatformRegistry>,
    history: Arc<dyn HistoryStore>,
    schedule: Arc<dyn ScheduleStore>,
}

impl HistoryService {
    pub fn new(
        registry: Arc<PlatformRegistry>,
        history: Arc<dyn HistoryStore>,
        schedule: Arc<dyn ScheduleStore>,
    ) -> Self {
        Self {
            registry,
            history,
            schedule,
        }
    }

    /// Page through the publish history, optionally filtered by platform
    pub async fn history(
        &self,
        platform: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> HistoryPage {
        self.history.query(platform, limit, offset).await
    }

    /// All scheduled posts, in creation order
    pub async fn scheduled(&self) -> Vec<ScheduledPost> {
        self.schedule.list().await
    }

    /// Cancel a scheduled post; false when the id matched nothing
    pub async fn cancel_scheduled(&self, id: u64) -> bool {
        let removed = self.schedule.cancel(id).await;
        if removed {
            info!(scheduled_id = id, "cancelled scheduled post");
        }
        removed
    }

    /// Aggregate publish counts per platform and per day
    ///
    /// Every registered platform gets a row, zero-count platforms included,
    /// so dashboards see the full platform set.
    pub async fn analytics(&self) -> AnalyticsReport {
        let aggregates = self.history.aggregate(&self.registry.ids()).await;

        AnalyticsReport {
            total_posts: aggregates.total_posts,
            platform_stats: aggregates.platform_stats,
            daily_stats: aggregates.daily_stats,
            scheduled_posts: self.schedule.count().await,
        }
    }
}
