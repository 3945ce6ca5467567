//! Video identifier extraction from user-supplied URLs
use regex::Regex;
use seo_core::{Result, SeoError};
use std::sync::LazyLock;
use tracing::{error, info};

/// Identifier patterns in precedence order; the first match wins
static ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // watch?v=ID, /embed/ID, any /ID path segment
        r"(?:v=|/)([0-9A-Za-z_-]{11})",
        // youtu.be/ID
        r"youtu\.be/([0-9A-Za-z_-]{11})",
        // youtube.com/shorts/ID
        r"youtube\.com/shorts/([0-9A-Za-z_-]{11})",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid video id pattern"))
    .collect()
});

/// Extract the 11-character video id from a URL
pub fn resolve(url: &str) -> Result<String> {
    if url.trim().is_empty() {
        error!("Error while extracting video ID: URL is empty");
        return Err(SeoError::InvalidInput("URL is empty or invalid".to_string()));
    }

    for pattern in ID_PATTERNS.iter() {
        if let Some(id) = pattern.captures(url).and_then(|c| c.get(1)) {
            let video_id = id.as_str().to_string();
            info!("Extracted video ID: {}", video_id);
            return Ok(video_id);
        }
    }

    error!("Could not find a video ID in {}", url);
    Err(SeoError::NoMatch(url.to_string()))
}

/// Canonical watch-page URL for a video id
pub fn watch_url(base: &str, video_id: &str) -> String {
    format!("{}?v={}", base.trim_end_matches('/'), video_id)
}
