//! Fake publisher implementations
//!
//! Each send synthesizes a post identifier from the platform's short code,
//! the current time, and a hash of the content, then reports success. No
//! network call occurs. The receipt shapes match what the real platform APIs
//! would return, so swapping in authenticated clients changes nothing for
//! callers.

use async_trait::async_trait;
use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{PlatformError, Result};
use crate::platforms::{PublishReceipt, Publisher};

/// Fake sender for one platform
pub struct StubPublisher {
    platform: String,
}

impl StubPublisher {
    pub fn new(platform: &str) -> Self {
        Self {
            platform: platform.to_string(),
        }
    }
}

#[async_trait]
impl Publisher for StubPublisher {
    fn name(&self) -> &str {
        &self.platform
    }

    async fn publish(&self, content: &str) -> Result<PublishReceipt> {
        let ts = Utc::now().timestamp();
        let digest = content_digest(content);

        let receipt = match self.platform.as_str() {
            "instagram" => {
                let post_id = format!("ig_{}_{}", ts, digest);
                let post_url = format!("https://instagram.com/p/{}", post_id);
                PublishReceipt { post_id, post_url }
            }
            "facebook" => {
                let post_id = format!("fb_{}_{}", ts, digest);
                let post_url = format!("https://facebook.com/{}", post_id);
                PublishReceipt { post_id, post_url }
            }
            "twitter" => {
                let post_id = format!("{}_{}", ts, digest);
                let post_url = format!("https://twitter.com/user/status/{}", post_id);
                PublishReceipt { post_id, post_url }
            }
            "linkedin" => {
                let post_id = format!("li_{}_{}", ts, digest);
                let post_url = format!("https://linkedin.com/posts/{}", post_id);
                PublishReceipt { post_id, post_url }
            }
            "wordpress" => {
                let post_id = format!("wp_{}", ts);
                let post_url = format!("https://example.com/{}", post_id);
                PublishReceipt { post_id, post_url }
            }
            "naver_blog" => {
                let post_id = format!("naver_{}", ts);
                let post_url = format!("https://blog.naver.com/username/{}", post_id);
                PublishReceipt { post_id, post_url }
            }
            "tistory" => {
                let post_id = format!("tistory_{}", ts);
                let post_url = format!("https://username.tistory.com/{}", post_id);
                PublishReceipt { post_id, post_url }
            }
            other => {
                return Err(PlatformError::NotImplemented(other.to_string()).into());
            }
        };

        debug!(
            platform = %self.platform,
            post_id = %receipt.post_id,
            "synthesized publish receipt"
        );

        Ok(receipt)
    }
}

/// Reduce content to a small stable number, mirroring the receipt shape real
/// platforms use for short post identifiers
fn content_digest(content: &str) -> u64 {
    let digest = Sha256::digest(content.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes) % 10_000
}
