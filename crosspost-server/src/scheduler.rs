//! Background promotion of due scheduled posts
//!
//! Polls the scheduled queue at a fixed interval and publishes every entry
//! whose schedule time has passed. Failures are logged per platform and the
//! entry is not retried; the queue only ever shrinks here.

use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{info, warn};

use libcrosspost::service::PublisherService;

/// Main scheduler loop; runs until the task is aborted
pub async fn run(service: Arc<PublisherService>, poll_interval: u64) {
    let poll_interval = poll_interval.max(1);
    info!(poll_interval, "scheduler loop started");

    let mut ticker = interval(Duration::from_secs(poll_interval));
    loop {
        ticker.tick().await;
        process_due_posts(&service).await;
    }
}

/// One scan of the scheduled queue
pub async fn process_due_posts(service: &PublisherService) {
    let results = service.publishing().promote_due().await;
    if results.is_empty() {
        return;
    }

    let successful = results.iter().filter(|r| r.success).count();
    info!(
        total = results.len(),
        successful, "processed due scheduled posts"
    );

    for result in results.iter().filter(|r| !r.success) {
        warn!(
            platform = %result.platform,
            error = result.error.as_deref().unwrap_or("unknown"),
            "scheduled publish failed"
        );
    }
}
