//! Per-platform content formatting
//!
//! Pure rendering of (title, body, media, hashtags) into the shape each
//! platform classification expects. Identical input always produces
//! byte-identical output; previews and publishes go through the same path.

use crate::registry::{PlatformConfig, PlatformKind};

/// Hashtags kept on professional platforms
const PROFESSIONAL_HASHTAG_LIMIT: usize = 3;

/// Render content for a platform according to its classification
///
/// Social platforms get title and body joined by a blank line, a trailing
/// hashtag list, and character-based truncation to the platform limit. Blog
/// platforms get an HTML rendering with embedded images and a tags paragraph.
/// Professional platforms keep at most three hashtags. Anything else passes
/// the body through unchanged.
pub fn format_for_platform(
    platform: &PlatformConfig,
    title: &str,
    body: &str,
    media_urls: &[String],
    hashtags: &[String],
) -> String {
    match platform.kind {
        PlatformKind::Social => format_social(platform.max_length, title, body, hashtags),
        PlatformKind::Blog => format_blog(title, body, media_urls, hashtags),
        PlatformKind::Professional => format_professional(title, body, hashtags),
        _ => body.to_string(),
    }
}

fn format_social(max_length: usize, title: &str, body: &str, hashtags: &[String]) -> String {
    let mut formatted = if title.is_empty() {
        body.to_string()
    } else {
        format!("{}\n\n{}", title, body)
    };

    if !hashtags.is_empty() {
        formatted.push_str("\n\n");
        formatted.push_str(&hashtag_list(hashtags));
    }

    truncate_with_ellipsis(formatted, max_length)
}

fn format_blog(title: &str, body: &str, media_urls: &[String], hashtags: &[String]) -> String {
    let mut formatted = format!("<h1>{}</h1>\n\n{}", title, body);

    for url in media_urls {
        formatted.push_str(&format!(
            "\n\n<img src=\"{}\" alt=\"{}\" style=\"max-width: 100%; height: auto;\">",
            url, title
        ));
    }

    if !hashtags.is_empty() {
        formatted.push_str(&format!("\n\n<p>Tags: {}</p>", hashtags.join(", ")));
    }

    formatted
}

fn format_professional(title: &str, body: &str, hashtags: &[String]) -> String {
    let mut formatted = format!("{}\n\n{}", title, body);

    if !hashtags.is_empty() {
        let kept: Vec<String> = hashtags
            .iter()
            .take(PROFESSIONAL_HASHTAG_LIMIT)
            .cloned()
            .collect();
        formatted.push_str("\n\n");
        formatted.push_str(&hashtag_list(&kept));
    }

    formatted
}

fn hashtag_list(hashtags: &[String]) -> String {
    hashtags
        .iter()
        .map(|tag| format!("#{}", tag))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate to `max_chars` characters, replacing the final three with an
/// ellipsis marker when truncation occurred
fn truncate_with_ellipsis(text: String, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text;
    }

    let mut truncated: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    truncated.push_str("...");
    truncated
}
