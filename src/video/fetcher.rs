//! Watch-page metadata scraper
use super::page_source::{HttpPageSource, PageSource};
use super::resolver::{resolve, watch_url};
use crate::config::FetchConfig;
use regex::Regex;
use seo_core::metadata::{DEFAULT_AUTHOR, DEFAULT_DURATION, DEFAULT_TITLE, DEFAULT_VIEWS};
use seo_core::{Result, SeoError, VideoMetadata};
use std::sync::LazyLock;
use tracing::{debug, error, info, warn};

static TITLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta property="og:title" content="([^"]+)""#).expect("valid title pattern")
});
static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""lengthSeconds":"(\d+)""#).expect("valid duration pattern")
});
static VIEWS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""viewCount":"(\d+)""#).expect("valid views pattern"));
static AUTHOR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""author":"([^"]+)""#).expect("valid author pattern"));

/// Fetches a video's public watch page and extracts its metadata
pub struct MetadataFetcher {
    source: Box<dyn PageSource>,
    watch_base: String,
}

impl MetadataFetcher {
    /// Create a fetcher over the real network
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let source = HttpPageSource::new(&config.user_agent, config.timeout_seconds)?;
        Ok(Self::with_source(Box::new(source), &config.watch_url))
    }

    /// Create a fetcher over an arbitrary page source
    pub fn with_source(source: Box<dyn PageSource>, watch_base: &str) -> Self {
        Self {
            source,
            watch_base: watch_base.to_string(),
        }
    }

    /// Resolve a URL and fetch metadata for the video it points at
    pub async fn fetch_for_url(&self, url: &str) -> Result<VideoMetadata> {
        info!("Processing URL {}", url);
        let video_id = resolve(url)?;
        self.fetch(&video_id).await
    }

    /// Fetch metadata for a video id
    ///
    /// Only a failed request or a non-success status is an error; fields the
    /// page does not expose fall back to their defaults.
    pub async fn fetch(&self, video_id: &str) -> Result<VideoMetadata> {
        let url = watch_url(&self.watch_base, video_id);
        info!("🌐 Fetching metadata for {}", video_id);

        let page = self.source.get(&url).await?;

        if !page.is_success() {
            error!("Watch page request failed for {} with HTTP {}", video_id, page.status);
            return Err(SeoError::Fetch {
                url,
                reason: format!("HTTP {}", page.status),
            });
        }

        let metadata = extract_metadata(video_id, &page.body);
        info!(
            "✅ Extracted metadata: \"{}\" by {} ({}s, {} views)",
            metadata.title, metadata.author, metadata.duration, metadata.views
        );
        Ok(metadata)
    }
}

/// Extract metadata from watch-page HTML, filling gaps with defaults
pub fn extract_metadata(video_id: &str, html: &str) -> VideoMetadata {
    let title = capture(&TITLE_PATTERN, html)
        .map(decode_html_entities)
        .unwrap_or_else(|| {
            debug!("No og:title found, using default");
            DEFAULT_TITLE.to_string()
        });

    let author = capture(&AUTHOR_PATTERN, html)
        .map(decode_json_escapes)
        .unwrap_or_else(|| {
            debug!("No author found, using default");
            DEFAULT_AUTHOR.to_string()
        });

    let duration = capture_number(&DURATION_PATTERN, html, "lengthSeconds", DEFAULT_DURATION);
    let views = capture_number(&VIEWS_PATTERN, html, "viewCount", DEFAULT_VIEWS);

    VideoMetadata::with_defaults(video_id)
        .with_title(title)
        .with_author(author)
        .with_duration(duration)
        .with_views(views)
}

fn capture<'a>(pattern: &Regex, html: &'a str) -> Option<&'a str> {
    pattern
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

fn capture_number(pattern: &Regex, html: &str, field: &str, default: u64) -> u64 {
    match capture(pattern, html) {
        Some(digits) => digits.parse().unwrap_or_else(|e| {
            warn!("Unparsable {} '{}' ({}), using default", field, digits, e);
            default
        }),
        None => {
            debug!("No {} found, using default", field);
            default
        }
    }
}

/// Decode named, decimal and hex entities inside `og:title`
fn decode_html_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

/// Decode the `\uXXXX` escapes YouTube emits inside inline JSON strings
fn decode_json_escapes(text: &str) -> String {
    if !text.contains('\\') {
        return text.to_string();
    }
    serde_json::from_str::<String>(&format!("\"{}\"", text)).unwrap_or_else(|_| text.to_string())
}
