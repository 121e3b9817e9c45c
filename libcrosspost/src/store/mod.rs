//! Store abstractions for publish history and the scheduled queue
//!
//! Both stores are seams: the traits here define the contract, and the
//! in-memory implementations in [`memory`] back them with a guarded
//! process-local structure. Identifier assignment happens inside the store,
//! under the same guard as the mutation, so concurrent requests cannot
//! observe duplicate ids or lost appends.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::types::{
    HistoryEntry, HistoryPage, NewHistoryEntry, NewScheduledPost, PlatformStats, ScheduledPost,
};

pub mod memory;

pub use memory::{InMemoryHistoryStore, InMemoryScheduleStore};

/// Aggregates computed over the publish history
#[derive(Debug, Clone)]
pub struct HistoryAggregates {
    pub total_posts: usize,
    pub platform_stats: BTreeMap<String, PlatformStats>,
    pub daily_stats: BTreeMap<String, usize>,
}

/// Append-only record of completed publishes
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Append an entry, assigning the next sequential identifier
    async fn append(&self, entry: NewHistoryEntry) -> HistoryEntry;

    /// Query entries, newest-insertion-last, filter applied before pagination
    async fn query(&self, platform: Option<&str>, limit: usize, offset: usize) -> HistoryPage;

    /// Aggregate counts per platform (one row per id given, zero rows kept)
    /// and per calendar day
    async fn aggregate(&self, platform_ids: &[String]) -> HistoryAggregates;
}

/// Queue of publishes deferred to a future timestamp
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Add a scheduled post, assigning the next sequential identifier
    async fn add(&self, post: NewScheduledPost) -> ScheduledPost;

    /// All scheduled posts, in creation order
    async fn list(&self) -> Vec<ScheduledPost>;

    /// Number of scheduled posts
    async fn count(&self) -> usize;

    /// Cancel by identifier; returns false when no entry matched
    async fn cancel(&self, id: u64) -> bool;

    /// Atomically remove and return every entry due at or before `now`
    async fn take_due(&self, now: DateTime<Utc>) -> Vec<ScheduledPost>;
}
