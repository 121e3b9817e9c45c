//! Platform registry
//!
//! Static table of publishing destinations, built once at startup. Each entry
//! carries the display name, content length limit, supported formats, and the
//! classification that drives per-platform formatting.

use serde::{Deserialize, Serialize};

/// Classification a platform's content rendering follows
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    /// Character-constrained, hashtag-friendly feeds
    Social,
    /// HTML-based long-form hosts
    Blog,
    /// Feed platforms with a restrained hashtag convention
    Professional,
    /// Video hosts; content passes through unformatted
    Video,
}

/// Content formats a platform accepts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    Text,
    Html,
    Image,
    Video,
    Story,
    Link,
    Article,
    Playlist,
}

/// Immutable configuration for one publishing destination
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformConfig {
    pub id: String,
    pub name: String,
    pub kind: PlatformKind,
    /// Maximum content length in characters
    pub max_length: usize,
    pub supported_formats: Vec<ContentFormat>,
    pub requires_auth: bool,
}

/// Registry of supported platforms, in registration order
pub struct PlatformRegistry {
    platforms: Vec<PlatformConfig>,
}

impl PlatformRegistry {
    /// Build the registry with every supported platform
    pub fn new() -> Self {
        use ContentFormat::*;

        let entry = |id: &str,
                     name: &str,
                     kind: PlatformKind,
                     max_length: usize,
                     supported_formats: Vec<ContentFormat>| PlatformConfig {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            max_length,
            supported_formats,
            requires_auth: true,
        };

        Self {
            platforms: vec![
                entry(
                    "naver_blog",
                    "Naver Blog",
                    PlatformKind::Blog,
                    10_000,
                    vec![Text, Html, Image],
                ),
                entry(
                    "tistory",
                    "Tistory",
                    PlatformKind::Blog,
                    50_000,
                    vec![Text, Html, Image],
                ),
                entry(
                    "wordpress",
                    "WordPress",
                    PlatformKind::Blog,
                    50_000,
                    vec![Text, Html, Image],
                ),
                entry(
                    "instagram",
                    "Instagram",
                    PlatformKind::Social,
                    2_200,
                    vec![Image, Video, Story],
                ),
                entry(
                    "facebook",
                    "Facebook",
                    PlatformKind::Social,
                    63_206,
                    vec![Text, Image, Video, Link],
                ),
                entry(
                    "twitter",
                    "Twitter/X",
                    PlatformKind::Social,
                    280,
                    vec![Text, Image],
                ),
                entry(
                    "linkedin",
                    "LinkedIn",
                    PlatformKind::Professional,
                    3_000,
                    vec![Text, Image, Article],
                ),
                entry(
                    "youtube",
                    "YouTube",
                    PlatformKind::Video,
                    5_000,
                    vec![Video, Playlist],
                ),
            ],
        }
    }

    /// Look up a platform by identifier
    pub fn get(&self, id: &str) -> Option<&PlatformConfig> {
        self.platforms.iter().find(|p| p.id == id)
    }

    /// All platforms, in registration order
    pub fn all(&self) -> &[PlatformConfig] {
        &self.platforms
    }

    /// Identifiers of all platforms, in registration order
    pub fn ids(&self) -> Vec<String> {
        self.platforms.iter().map(|p| p.id.clone()).collect()
    }
}

impl Default for PlatformRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup_known_platforms() {
        let registry = PlatformRegistry::new();

        let twitter = registry.get("twitter").unwrap();
        assert_eq!(twitter.name, "Twitter/X");
        assert_eq!(twitter.max_length, 280);
        assert_eq!(twitter.kind, PlatformKind::Social);
        assert!(twitter.requires_auth);

        let wordpress = registry.get("wordpress").unwrap();
        assert_eq!(wordpress.max_length, 50_000);
        assert_eq!(wordpress.kind, PlatformKind::Blog);

        let linkedin = registry.get("linkedin").unwrap();
        assert_eq!(linkedin.max_length, 3_000);
        assert_eq!(linkedin.kind, PlatformKind::Professional);

        let youtube = registry.get("youtube").unwrap();
        assert_eq!(youtube.max_length, 5_000);
        assert_eq!(youtube.kind, PlatformKind::Video);
    }

    #[test]
    fn test_registry_max_lengths_match_table() {
        let registry = PlatformRegistry::new();
        let expected = [
            ("naver_blog", 10_000),
            ("tistory", 50_000),
            ("wordpress", 50_000),
            ("instagram", 2_200),
            ("facebook", 63_206),
            ("twitter", 280),
            ("linkedin", 3_000),
            ("youtube", 5_000),
        ];

        for (id, max_length) in expected {
            assert_eq!(
                registry.get(id).unwrap().max_length,
                max_length,
                "max_length mismatch for {}",
                id
            );
        }
    }

    #[test]
    fn test_registry_unknown_platform_not_found() {
        let registry = PlatformRegistry::new();
        assert!(registry.get("myspace").is_none());
        assert!(registry.get("").is_none());
    }

    #[test]
    fn test_registry_preserves_registration_order() {
        let registry = PlatformRegistry::new();
        let ids = registry.ids();

        assert_eq!(
            ids,
            vec![
                "naver_blog",
                "tistory",
                "wordpress",
                "instagram",
                "facebook",
                "twitter",
                "linkedin",
                "youtube"
            ]
        );
    }

    #[test]
    fn test_platform_config_serializes_camel_case() {
        let registry = PlatformRegistry::new();
        let json = serde_json::to_value(registry.get("twitter").unwrap()).unwrap();

        assert_eq!(json["maxLength"], 280);
        assert_eq!(json["requiresAuth"], true);
        assert_eq!(json["supportedFormats"][0], "text");
        assert_eq!(json["kind"], "social");
    }
}
