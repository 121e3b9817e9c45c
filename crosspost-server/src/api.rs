//! HTTP API for the publisher surface

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use std::sync::Arc;

use libcrosspost::service::{BatchOutcome, PublishOutcome, PublisherService};

use crate::request::{BatchPublishBody, HistoryParams, PreviewBody, PublishBody};
use crate::response::{
    AnalyticsResponse, ApiError, BatchResponse, CancelResponse, HistoryResponse, Pagination,
    PlatformsResponse, PreviewResponse, PublishedResponse, ScheduledListResponse,
    ScheduledResponse,
};

const DEFAULT_HISTORY_LIMIT: usize = 20;

/// API server state
#[derive(Clone)]
pub struct ApiState {
    pub service: Arc<PublisherService>,
}

/// Creates the API router
pub fn create_router(service: Arc<PublisherService>) -> Router {
    let state = ApiState { service };

    Router::new()
        .route("/health", get(health_check))
        .route("/api/publisher/platforms", get(get_platforms))
        .route("/api/publisher/publish", post(publish))
        .route("/api/publisher/publish/batch", post(publish_batch))
        .route("/api/publisher/preview", post(preview))
        .route("/api/publisher/history", get(get_history))
        .route("/api/publisher/scheduled", get(get_scheduled))
        .route("/api/publisher/scheduled/:id", delete(cancel_scheduled))
        .route("/api/publisher/analytics", get(get_analytics))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// List every supported platform
async fn get_platforms(State(state): State<ApiState>) -> impl IntoResponse {
    let platforms = state.service.registry().all().to_vec();
    let total_count = platforms.len();

    Json(PlatformsResponse {
        success: true,
        platforms,
        total_count,
    })
}

/// Publish to one platform, or defer when a future schedule time is given
async fn publish(
    State(state): State<ApiState>,
    Json(body): Json<PublishBody>,
) -> Result<Response, ApiError> {
    let request = body.into_request()?;

    match state.service.publishing().publish(request).await? {
        PublishOutcome::Published(post) => Ok(Json(PublishedResponse {
            success: true,
            platform: post.platform,
            post_url: post.post_url,
            post_id: post.post_id,
            message: post.message,
            published_at: post.published_at,
        })
        .into_response()),
        PublishOutcome::Scheduled(confirmation) => Ok(Json(ScheduledResponse {
            success: true,
            message: confirmation.message,
            scheduled_id: confirmation.scheduled_id,
            schedule_time: confirmation.schedule_time,
        })
        .into_response()),
    }
}

/// Publish the same content to several platforms
async fn publish_batch(
    State(state): State<ApiState>,
    Json(body): Json<BatchPublishBody>,
) -> Result<Response, ApiError> {
    let request = body.into_request()?;

    match state.service.publishing().publish_batch(request).await? {
        BatchOutcome::Dispatched {
            results,
            summary,
            message,
        } => Ok(Json(BatchResponse {
            success: true,
            results,
            summary,
            message,
        })
        .into_response()),
        BatchOutcome::Scheduled(confirmation) => Ok(Json(ScheduledResponse {
            success: true,
            message: confirmation.message,
            scheduled_id: confirmation.scheduled_id,
            schedule_time: confirmation.schedule_time,
        })
        .into_response()),
    }
}

/// Render content exactly as a publish would send it
async fn preview(
    State(state): State<ApiState>,
    Json(body): Json<PreviewBody>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let (platform, content) = body.into_parts()?;
    let (preview, platform_info) = state.service.publishing().preview(&platform, &content)?;

    Ok(Json(PreviewResponse {
        success: true,
        platform,
        preview,
        platform_info,
    }))
}

/// Page through the publish history
async fn get_history(
    State(state): State<ApiState>,
    Query(params): Query<HistoryParams>,
) -> Json<HistoryResponse> {
    let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let offset = params.offset.unwrap_or(0);

    let page = state
        .service
        .history()
        .history(params.platform.as_deref(), limit, offset)
        .await;

    Json(HistoryResponse {
        success: true,
        history: page.items,
        pagination: Pagination {
            total: page.total,
            limit: page.limit,
            offset: page.offset,
            has_more: page.has_more,
        },
    })
}

/// List scheduled posts
async fn get_scheduled(State(state): State<ApiState>) -> Json<ScheduledListResponse> {
    let scheduled_posts = state.service.history().scheduled().await;
    let total_count = scheduled_posts.len();

    Json(ScheduledListResponse {
        success: true,
        scheduled_posts,
        total_count,
    })
}

/// Cancel a scheduled post; cancelling an absent id is a no-op
async fn cancel_scheduled(
    State(state): State<ApiState>,
    Path(id): Path<u64>,
) -> Json<CancelResponse> {
    state.service.history().cancel_scheduled(id).await;

    Json(CancelResponse {
        success: true,
        message: format!("Scheduled post {} cancelled", id),
    })
}

/// Aggregated publish analytics
async fn get_analytics(State(state): State<ApiState>) -> Json<AnalyticsResponse> {
    let analytics = state.service.history().analytics().await;

    Json(AnalyticsResponse {
        success: true,
        analytics,
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}
