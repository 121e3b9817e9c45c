//! Integration tests for the publishing service
//!
//! These exercise the full orchestration path: registry validation,
//! formatting, dispatch through the fake sender set, history recording,
//! scheduling, and promotion of due posts.

use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;

use libcrosspost::platforms::mock::MockPublisher;
use libcrosspost::platforms::{create_publishers, Publisher};
use libcrosspost::registry::PlatformRegistry;
use libcrosspost::service::{BatchOutcome, PublishOutcome, PublisherService};
use libcrosspost::store::{
    InMemoryHistoryStore, InMemoryScheduleStore, ScheduleStore,
};
use libcrosspost::types::{
    BatchPublishRequest, NewScheduledPost, PostContent, PublishRequest,
};

fn service() -> PublisherService {
    PublisherService::new()
}

/// Service plus a handle on its schedule store, for seeding due entries
fn service_with_schedule_handle() -> (PublisherService, Arc<InMemoryScheduleStore>) {
    let registry = Arc::new(PlatformRegistry::new());
    let publishers = Arc::new(create_publishers(&registry));
    let schedule = Arc::new(InMemoryScheduleStore::new());
    let service = PublisherService::with_parts(
        registry,
        publishers,
        Arc::new(InMemoryHistoryStore::new()),
        Arc::clone(&schedule) as Arc<dyn ScheduleStore>,
    );
    (service, schedule)
}

fn publish_request(platform: &str, body: &str) -> PublishRequest {
    PublishRequest {
        platform: platform.to_string(),
        content: PostContent::new(body),
        schedule_time: None,
    }
}

#[tokio::test]
async fn test_publish_twitter_records_history() {
    let service = service();

    let outcome = service
        .publishing()
        .publish(publish_request("twitter", "hello world"))
        .await
        .unwrap();

    let post = match outcome {
        PublishOutcome::Published(post) => post,
        other => panic!("expected published outcome, got {:?}", other),
    };

    assert_eq!(post.platform, "twitter");
    assert!(post.post_url.starts_with("https://twitter.com/"));
    assert!(!post.post_id.is_empty());
    assert_eq!(post.message, "Successfully published to Twitter/X");

    let page = service.history().history(None, 20, 0).await;
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].platform, "twitter");
    assert_eq!(page.items[0].content, "hello world");
    assert_eq!(page.items[0].id, 1);
}

#[tokio::test]
async fn test_publish_unknown_platform_is_rejected() {
    let service = service();

    let result = service
        .publishing()
        .publish(publish_request("myspace", "hello"))
        .await;

    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Unsupported platform: myspace"));

    let page = service.history().history(None, 20, 0).await;
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn test_publish_youtube_has_no_sender() {
    let service = service();

    let result = service
        .publishing()
        .publish(publish_request("youtube", "video description"))
        .await;

    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("publishing to youtube not implemented"));
}

#[tokio::test]
async fn test_schedule_future_defers_without_history() {
    let service = service();
    let schedule_time = (Utc::now() + Duration::hours(1)).to_rfc3339();

    let mut request = publish_request("twitter", "later");
    request.schedule_time = Some(schedule_time.clone());

    let outcome = service.publishing().publish(request).await.unwrap();

    let confirmation = match outcome {
        PublishOutcome::Scheduled(confirmation) => confirmation,
        other => panic!("expected scheduled outcome, got {:?}", other),
    };
    assert_eq!(confirmation.schedule_time, schedule_time);
    assert_eq!(confirmation.message, "Content scheduled for twitter");

    // Deferred, so nothing reached the history store
    assert_eq!(service.history().history(None, 20, 0).await.total, 0);

    let scheduled = service.history().scheduled().await;
    assert_eq!(scheduled.len(), 1);
    assert_eq!(scheduled[0].id, confirmation.scheduled_id);
    assert_eq!(scheduled[0].platforms, vec!["twitter"]);
}

#[tokio::test]
async fn test_cancel_scheduled_removes_entry() {
    let service = service();
    let mut request = publish_request("twitter", "later");
    request.schedule_time = Some((Utc::now() + Duration::hours(1)).to_rfc3339());

    let outcome = service.publishing().publish(request).await.unwrap();
    let PublishOutcome::Scheduled(confirmation) = outcome else {
        panic!("expected scheduled outcome");
    };

    assert!(service
        .history()
        .cancel_scheduled(confirmation.scheduled_id)
        .await);
    assert!(service.history().scheduled().await.is_empty());

    // Cancelling again is a no-op
    assert!(!service
        .history()
        .cancel_scheduled(confirmation.scheduled_id)
        .await);
}

#[tokio::test]
async fn test_schedule_in_the_past_publishes_immediately() {
    let service = service();
    let mut request = publish_request("twitter", "now after all");
    request.schedule_time = Some((Utc::now() - Duration::hours(1)).to_rfc3339());

    let outcome = service.publishing().publish(request).await.unwrap();

    assert!(matches!(outcome, PublishOutcome::Published(_)));
    assert_eq!(service.history().history(None, 20, 0).await.total, 1);
    assert!(service.history().scheduled().await.is_empty());
}

#[tokio::test]
async fn test_invalid_schedule_time_is_rejected() {
    let service = service();
    let mut request = publish_request("twitter", "whenever");
    request.schedule_time = Some("next tuesday".to_string());

    let result = service.publishing().publish(request).await;

    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Could not parse schedule time"));
}

#[tokio::test]
async fn test_batch_mixed_platforms_preserves_order() {
    let service = service();
    let request = BatchPublishRequest {
        platforms: vec!["twitter".to_string(), "myspace".to_string()],
        content: PostContent::new("to everyone"),
        schedule_time: None,
    };

    let outcome = service.publishing().publish_batch(request).await.unwrap();

    let BatchOutcome::Dispatched {
        results,
        summary,
        message,
    } = outcome
    else {
        panic!("expected dispatched outcome");
    };

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].platform, "twitter");
    assert!(results[0].success);
    assert_eq!(results[1].platform, "myspace");
    assert!(!results[1].success);
    assert_eq!(
        results[1].error.as_deref(),
        Some("Unsupported platform: myspace")
    );

    assert_eq!(summary.total_platforms, 2);
    assert_eq!(summary.successful, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(message, "Published to 1/2 platforms");

    // Only the successful platform reached history
    let page = service.history().history(None, 20, 0).await;
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].platform, "twitter");
}

#[tokio::test]
async fn test_batch_failure_does_not_abort_remaining_platforms() {
    let registry = Arc::new(PlatformRegistry::new());
    let mut publishers: HashMap<String, Arc<dyn Publisher>> = HashMap::new();
    publishers.insert(
        "twitter".to_string(),
        Arc::new(MockPublisher::failure("twitter", "relay down")),
    );
    publishers.insert(
        "facebook".to_string(),
        Arc::new(MockPublisher::success("facebook")),
    );

    let service = PublisherService::with_parts(
        registry,
        Arc::new(publishers),
        Arc::new(InMemoryHistoryStore::new()),
        Arc::new(InMemoryScheduleStore::new()),
    );

    let request = BatchPublishRequest {
        platforms: vec!["twitter".to_string(), "facebook".to_string()],
        content: PostContent::new("resilient"),
        schedule_time: None,
    };

    let BatchOutcome::Dispatched { results, summary, .. } =
        service.publishing().publish_batch(request).await.unwrap()
    else {
        panic!("expected dispatched outcome");
    };

    assert!(!results[0].success);
    assert!(results[0].error.as_deref().unwrap().contains("relay down"));
    assert!(results[1].success);
    assert_eq!(summary.successful, 1);
    assert_eq!(summary.failed, 1);
}

#[tokio::test]
async fn test_batch_schedule_creates_one_compound_entry() {
    let service = service();
    let request = BatchPublishRequest {
        platforms: vec!["twitter".to_string(), "facebook".to_string()],
        content: PostContent::new("later, everyone"),
        schedule_time: Some((Utc::now() + Duration::hours(2)).to_rfc3339()),
    };

    let outcome = service.publishing().publish_batch(request).await.unwrap();

    assert!(matches!(outcome, BatchOutcome::Scheduled(_)));

    let scheduled = service.history().scheduled().await;
    assert_eq!(scheduled.len(), 1);
    assert_eq!(scheduled[0].platforms, vec!["twitter", "facebook"]);
    assert_eq!(service.history().history(None, 20, 0).await.total, 0);
}

#[tokio::test]
async fn test_history_pagination() {
    let service = service();
    for i in 0..25 {
        service
            .publishing()
            .publish(publish_request("twitter", &format!("post {}", i)))
            .await
            .unwrap();
    }

    let tail = service.history().history(None, 10, 20).await;
    assert_eq!(tail.items.len(), 5);
    assert!(!tail.has_more);

    let head = service.history().history(None, 10, 0).await;
    assert_eq!(head.items.len(), 10);
    assert!(head.has_more);
}

#[tokio::test]
async fn test_analytics_covers_all_platforms() {
    let service = service();
    service
        .publishing()
        .publish(publish_request("twitter", "one"))
        .await
        .unwrap();
    service
        .publishing()
        .publish(publish_request("twitter", "two"))
        .await
        .unwrap();
    service
        .publishing()
        .publish(publish_request("facebook", "three"))
        .await
        .unwrap();

    let mut request = publish_request("linkedin", "later");
    request.schedule_time = Some((Utc::now() + Duration::hours(1)).to_rfc3339());
    service.publishing().publish(request).await.unwrap();

    let analytics = service.history().analytics().await;

    assert_eq!(analytics.total_posts, 3);
    assert_eq!(analytics.platform_stats["twitter"].total_posts, 2);
    assert!(analytics.platform_stats["twitter"].latest_post.is_some());
    assert_eq!(analytics.platform_stats["facebook"].total_posts, 1);
    // Zero-count platforms still get a row
    assert_eq!(analytics.platform_stats["youtube"].total_posts, 0);
    assert_eq!(analytics.platform_stats.len(), 8);
    assert_eq!(analytics.scheduled_posts, 1);

    // All three publishes happened today
    let today: usize = analytics.daily_stats.values().sum();
    assert_eq!(today, 3);
}

#[tokio::test]
async fn test_promote_due_publishes_and_drains() {
    let (service, schedule) = service_with_schedule_handle();

    // Seed an entry that is already due
    let due_at = Utc::now() - Duration::minutes(5);
    schedule
        .add(NewScheduledPost {
            platforms: vec!["twitter".to_string(), "facebook".to_string()],
            content: PostContent::new("overdue"),
            schedule_time: due_at.to_rfc3339(),
            due_at,
            created_at: Utc::now().to_rfc3339(),
        })
        .await;

    let results = service.publishing().promote_due().await;

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.success));
    assert!(service.history().scheduled().await.is_empty());

    let page = service.history().history(None, 20, 0).await;
    assert_eq!(page.total, 2);

    // A second pass finds nothing to do
    assert!(service.publishing().promote_due().await.is_empty());
}

#[tokio::test]
async fn test_promote_due_leaves_future_entries() {
    let (service, schedule) = service_with_schedule_handle();

    let due_at = Utc::now() + Duration::hours(3);
    schedule
        .add(NewScheduledPost {
            platforms: vec!["twitter".to_string()],
            content: PostContent::new("not yet"),
            schedule_time: due_at.to_rfc3339(),
            due_at,
            created_at: Utc::now().to_rfc3339(),
        })
        .await;

    assert!(service.publishing().promote_due().await.is_empty());
    assert_eq!(service.history().scheduled().await.len(), 1);
}
