//! In-memory store implementations
//!
//! Process-lifetime storage behind a single writer lock per store. Contents
//! are lost on restart; that is the intended lifecycle for this service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::store::{HistoryAggregates, HistoryStore, ScheduleStore};
use crate::types::{
    HistoryEntry, HistoryPage, NewHistoryEntry, NewScheduledPost, PlatformStats, PublishStatus,
    ScheduledPost,
};

#[derive(Default)]
struct HistoryInner {
    entries: Vec<HistoryEntry>,
    next_id: u64,
}

/// History store backed by a guarded in-memory list
pub struct InMemoryHistoryStore {
    inner: RwLock<HistoryInner>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HistoryInner {
                entries: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryHistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn append(&self, entry: NewHistoryEntry) -> HistoryEntry {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;

        let entry = HistoryEntry {
            id,
            platform: entry.platform,
            title: entry.title,
            content: entry.content,
            post_url: entry.post_url,
            post_id: entry.post_id,
            status: entry.status,
            hashtags: entry.hashtags,
            tags: entry.tags,
            published_at: entry.published_at,
        };
        inner.entries.push(entry.clone());
        entry
    }

    async fn query(&self, platform: Option<&str>, limit: usize, offset: usize) -> HistoryPage {
        let inner = self.inner.read().await;

        let filtered: Vec<&HistoryEntry> = inner
            .entries
            .iter()
            .filter(|e| platform.map_or(true, |p| e.platform == p))
            .collect();

        let total = filtered.len();
        let items: Vec<HistoryEntry> = filtered
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        HistoryPage {
            items,
            total,
            limit,
            offset,
            has_more: offset + limit < total,
        }
    }

    async fn aggregate(&self, platform_ids: &[String]) -> HistoryAggregates {
        let inner = self.inner.read().await;

        let mut platform_stats = BTreeMap::new();
        for id in platform_ids {
            let mut total_posts = 0;
            let mut latest_post = None;
            for entry in inner.entries.iter().filter(|e| &e.platform == id) {
                total_posts += 1;
                latest_post = Some(entry.published_at.clone());
            }
            platform_stats.insert(
                id.clone(),
                PlatformStats {
                    total_posts,
                    latest_post,
                },
            );
        }

        let mut daily_stats: BTreeMap<String, usize> = BTreeMap::new();
        for entry in &inner.entries {
            let date = entry
                .published_at
                .get(..10)
                .unwrap_or(&entry.published_at)
                .to_string();
            *daily_stats.entry(date).or_insert(0) += 1;
        }

        HistoryAggregates {
            total_posts: inner.entries.len(),
            platform_stats,
            daily_stats,
        }
    }
}

struct ScheduledRecord {
    due_at: DateTime<Utc>,
    post: ScheduledPost,
}

#[derive(Default)]
struct ScheduleInner {
    records: Vec<ScheduledRecord>,
    next_id: u64,
}

/// Scheduled post store backed by a guarded in-memory list
pub struct InMemoryScheduleStore {
    inner: RwLock<ScheduleInner>,
}

impl InMemoryScheduleStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(ScheduleInner {
                records: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryScheduleStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScheduleStore for InMemoryScheduleStore {
    async fn add(&self, post: NewScheduledPost) -> ScheduledPost {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;

        let scheduled = ScheduledPost {
            id,
            platforms: post.platforms,
            content: post.content.body,
            title: post.content.title,
            media_urls: post.content.media_urls,
            hashtags: post.content.hashtags,
            tags: post.content.tags,
            schedule_time: post.schedule_time,
            status: PublishStatus::Scheduled,
            created_at: post.created_at,
        };
        inner.records.push(ScheduledRecord {
            due_at: post.due_at,
            post: scheduled.clone(),
        });
        scheduled
    }

    async fn list(&self) -> Vec<ScheduledPost> {
        let inner = self.inner.read().await;
        inner.records.iter().map(|r| r.post.clone()).collect()
    }

    async fn count(&self) -> usize {
        self.inner.read().await.records.len()
    }

    async fn cancel(&self, id: u64) -> bool {
        let mut inner = self.inner.write().await;
        let before = inner.records.len();
        inner.records.retain(|r| r.post.id != id);
        inner.records.len() != before
    }

    async fn take_due(&self, now: DateTime<Utc>) -> Vec<ScheduledPost> {
        let mut inner = self.inner.write().await;
        let mut due = Vec::new();
        let mut remaining = Vec::new();

        for record in inner.records.drain(..) {
            if record.due_at <= now {
                due.push(record.post);
            } else {
                remaining.push(record);
            }
        }
        inner.records = remaining;
        due
    }
}
