//! Mock publisher implementation for testing
//!
//! A configurable publisher that can simulate successes, failures, and
//! delays, and records what was sent. Used by integration tests to verify
//! multi-platform orchestration without depending on the fake sender set's
//! receipt synthesis.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::error::{PlatformError, Result};
use crate::platforms::{PublishReceipt, Publisher};

/// Configuration for mock publisher behavior
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Platform name (e.g. "mock-twitter")
    pub name: String,

    /// Whether publishing should succeed
    pub publish_succeeds: bool,

    /// Error to return on publish failure
    pub publish_error: Option<String>,

    /// Delay before completing operations (simulates network latency)
    pub delay: Duration,

    /// Number of times publish has been called
    pub publish_call_count: Arc<Mutex<usize>>,

    /// Content that has been published (for verification)
    pub published_content: Arc<Mutex<Vec<String>>>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            name: "mock".to_string(),
            publish_succeeds: true,
            publish_error: None,
            delay: Duration::from_millis(0),
            publish_call_count: Arc::new(Mutex::new(0)),
            published_content: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Mock publisher for testing
pub struct MockPublisher {
    config: MockConfig,
}

impl MockPublisher {
    /// Create a new mock publisher with the given configuration
    pub fn new(config: MockConfig) -> Self {
        Self { config }
    }

    /// Create a mock publisher that always succeeds
    pub fn success(name: &str) -> Self {
        Self::new(MockConfig {
            name: name.to_string(),
            ..Default::default()
        })
    }

    /// Create a mock publisher that fails publishing
    pub fn failure(name: &str, error: &str) -> Self {
        Self::new(MockConfig {
            name: name.to_string(),
            publish_succeeds: false,
            publish_error: Some(error.to_string()),
            ..Default::default()
        })
    }

    /// Create a mock publisher with a delay
    pub fn with_delay(name: &str, delay: Duration) -> Self {
        Self::new(MockConfig {
            name: name.to_string(),
            delay,
            ..Default::default()
        })
    }

    /// Get the number of times publish was called
    pub fn publish_call_count(&self) -> usize {
        *self.config.publish_call_count.lock().unwrap()
    }

    /// Get all content that was published
    pub fn published_content(&self) -> Vec<String> {
        self.config.published_content.lock().unwrap().clone()
    }
}

#[async_trait]
impl Publisher for MockPublisher {
    fn name(&self) -> &str {
        &self.config.name
    }

    async fn publish(&self, content: &str) -> Result<PublishReceipt> {
        *self.config.publish_call_count.lock().unwrap() += 1;

        if !self.config.delay.is_zero() {
            sleep(self.config.delay).await;
        }

        if self.config.publish_succeeds {
            self.config
                .published_content
                .lock()
                .unwrap()
                .push(content.to_string());

            let post_id = format!("{}:mock-{}", self.config.name, uuid::Uuid::new_v4());
            let post_url = format!("https://mock.invalid/{}/{}", self.config.name, post_id);
            Ok(PublishReceipt { post_id, post_url })
        } else {
            let error_msg = self
                .config
                .publish_error
                .clone()
                .unwrap_or_else(|| "Mock publishing failed".to_string());
            Err(PlatformError::Publish(error_msg).into())
        }
    }
}
