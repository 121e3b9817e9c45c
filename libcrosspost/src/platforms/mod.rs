//! Platform abstraction and implementations
//!
//! This module provides a unified trait for sending content to publishing
//! destinations. The implementations shipped here are an explicitly fake set:
//! they synthesize plausible receipts without performing network calls. A
//! production deployment replaces them with authenticated clients behind the
//! same trait.
//!
//! # Examples
//!
//! ```
//! use libcrosspost::platforms::{create_publishers, Publisher};
//! use libcrosspost::registry::PlatformRegistry;
//!
//! # async fn example() -> libcrosspost::Result<()> {
//! let registry = PlatformRegistry::new();
//! let publishers = create_publishers(&registry);
//!
//! if let Some(publisher) = publishers.get("twitter") {
//!     let receipt = publisher.publish("hello world").await?;
//!     println!("Posted: {}", receipt.post_url);
//! }
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::registry::{PlatformKind, PlatformRegistry};

pub mod mock;
pub mod stub;

/// Identifiers a platform hands back after accepting a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    pub post_id: String,
    pub post_url: String,
}

/// Publisher trait for sending content to one platform
///
/// Implementations own everything platform-specific about a send: endpoint,
/// authentication, and receipt shape. Callers format content before handing
/// it over; the publisher receives the final rendering.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Lowercase platform identifier (e.g. "twitter", "wordpress")
    fn name(&self) -> &str;

    /// Send content to the platform
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Publish` if the platform rejects the post, or
    /// `PlatformError::NotImplemented` if no sender exists for the platform.
    async fn publish(&self, content: &str) -> Result<PublishReceipt>;
}

/// Build the fake publisher set for every registered platform that has one
///
/// Platforms without a sender (video hosts) are absent from the map; callers
/// surface the gap as a not-implemented failure.
pub fn create_publishers(registry: &PlatformRegistry) -> HashMap<String, Arc<dyn Publisher>> {
    registry
        .all()
        .iter()
        .filter(|p| p.kind != PlatformKind::Video)
        .map(|p| {
            let publisher: Arc<dyn Publisher> = Arc::new(stub::StubPublisher::new(&p.id));
            (p.id.clone(), publisher)
        })
        .collect()
}
