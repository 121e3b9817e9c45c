//! Service layer for Crosspost
//!
//! This module provides a clean, testable API for business logic that can be
//! consumed by any interface (HTTP server, CLI) without code duplication.
//!
//! # Architecture
//!
//! The service layer follows a facade pattern with `PublisherService` as the
//! main entry point, coordinating specialized sub-services:
//!
//! - `PublishingService`: single/batch/deferred dispatch and promotion
//! - `HistoryService`: history queries, scheduled queue, analytics
//!
//! # Example
//!
//! ```
//! use libcrosspost::service::PublisherService;
//! use libcrosspost::types::{PostContent, PublishRequest};
//!
//! # async fn example() -> libcrosspost::Result<()> {
//! let service = PublisherService::new();
//!
//! let request = PublishRequest {
//!     platform: "twitter".to_string(),
//!     content: PostContent::new("hello world"),
//!     schedule_time: None,
//! };
//!
//! let outcome = service.publishing().publish(request).await?;
//! println!("{:?}", outcome);
//! # Ok(())
//! # }
//! ```

pub mod history;
pub mod publishing;

pub use publishing::{BatchOutcome, BatchSummary, PublishOutcome, PublishedPost, ScheduledConfirmation};

use self::history::HistoryService;
use self::publishing::PublishingService;
use crate::platforms::{create_publishers, Publisher};
use crate::registry::PlatformRegistry;
use crate::store::{HistoryStore, InMemoryHistoryStore, InMemoryScheduleStore, ScheduleStore};
use std::collections::HashMap;
use std::sync::Arc;

/// Main service facade that coordinates all sub-services
///
/// All sub-services share the same registry and store instances, so a
/// publish recorded by the publishing service is immediately visible to
/// history queries.
pub struct PublisherService {
    registry: Arc<PlatformRegistry>,
    publishing: PublishingService,
    history: HistoryService,
}

impl PublisherService {
    /// Create a service with the fake publisher set and fresh in-memory stores
    pub fn new() -> Self {
        let registry = Arc::new(PlatformRegistry::new());
        let publishers = Arc::new(create_publishers(&registry));
        Self::with_parts(
            registry,
            publishers,
            Arc::new(InMemoryHistoryStore::new()),
            Arc::new(InMemoryScheduleStore::new()),
        )
    }

    /// Create a service from explicit parts
    ///
    /// Tests use this to substitute mock publishers or pre-seeded stores.
    pub fn with_parts(
        registry: Arc<PlatformRegistry>,
        publishers: Arc<HashMap<String, Arc<dyn Publisher>>>,
        history: Arc<dyn HistoryStore>,
        schedule: Arc<dyn ScheduleStore>,
    ) -> Self {
        let publishing = PublishingService::new(
            Arc::clone(&registry),
            publishers,
            Arc::clone(&history),
            Arc::clone(&schedule),
        );
        let history = HistoryService::new(Arc::clone(&registry), history, schedule);

        Self {
            registry,
            publishing,
            history,
        }
    }

    /// Access the platform registry
    pub fn registry(&self) -> &PlatformRegistry {
        &self.registry
    }

    /// Access the publishing service
    pub fn publishing(&self) -> &PublishingService {
        &self.publishing
    }

    /// Access the history service
    pub fn history(&self) -> &HistoryService {
        &self.history
    }
}

impl Default for PublisherService {
    fn default() -> Self {
        Self::new()
    }
}
