//! Request bodies and query parameters for the publisher API
//!
//! Required fields are Option-typed and validated in `into_request`
//! conversions so that a missing field produces the API's uniform
//! `{"error": ...}` shape instead of a deserializer rejection.

use serde::Deserialize;

use libcrosspost::types::{BatchPublishRequest, PostContent, PublishRequest};

use crate::response::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishBody {
    pub platform: Option<String>,
    pub content: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub media_urls: Vec<String>,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub schedule_time: Option<String>,
}

impl PublishBody {
    pub fn into_request(self) -> Result<PublishRequest, ApiError> {
        let (Some(platform), Some(content)) = (self.platform, self.content) else {
            return Err(ApiError::bad_request("Platform and content are required"));
        };

        Ok(PublishRequest {
            platform,
            content: PostContent {
                body: content,
                title: self.title,
                media_urls: self.media_urls,
                hashtags: self.hashtags,
                tags: self.tags,
            },
            schedule_time: self.schedule_time,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchPublishBody {
    pub platforms: Option<Vec<String>>,
    pub content: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub media_urls: Vec<String>,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub schedule_time: Option<String>,
}

impl BatchPublishBody {
    pub fn into_request(self) -> Result<BatchPublishRequest, ApiError> {
        let (Some(platforms), Some(content)) = (self.platforms, self.content) else {
            return Err(ApiError::bad_request("Platforms and content are required"));
        };

        Ok(BatchPublishRequest {
            platforms,
            content: PostContent {
                body: content,
                title: self.title,
                media_urls: self.media_urls,
                hashtags: self.hashtags,
                tags: self.tags,
            },
            schedule_time: self.schedule_time,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewBody {
    pub platform: Option<String>,
    pub content: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub media_urls: Vec<String>,
    #[serde(default)]
    pub hashtags: Vec<String>,
}

impl PreviewBody {
    pub fn into_parts(self) -> Result<(String, PostContent), ApiError> {
        let (Some(platform), Some(content)) = (self.platform, self.content) else {
            return Err(ApiError::bad_request("Platform and content are required"));
        };

        Ok((
            platform,
            PostContent {
                body: content,
                title: self.title,
                media_urls: self.media_urls,
                hashtags: self.hashtags,
                tags: Vec::new(),
            },
        ))
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub platform: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}
