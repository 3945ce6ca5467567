//! Video metadata scraped from a public watch page

use serde::{Deserialize, Serialize};

/// Platform tag attached to every record
pub const PLATFORM: &str = "Youtube";

/// Title used when the page carries no `og:title`
pub const DEFAULT_TITLE: &str = "Untitled Video";

/// Author used when the page carries no author field
pub const DEFAULT_AUTHOR: &str = "Unknown Creator";

/// Duration in seconds used when `lengthSeconds` is absent
pub const DEFAULT_DURATION: u64 = 400;

/// View count used when `viewCount` is absent
pub const DEFAULT_VIEWS: u64 = 100;

/// Public metadata for a single video
///
/// Every field is always populated; scraping gaps are filled with the
/// defaults above so the record is never partially constructed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoMetadata {
    /// 11-character video identifier
    pub video_id: String,

    /// Video title
    pub title: String,

    /// Channel or creator name
    pub author: String,

    /// Duration in seconds
    pub duration: u64,

    /// Public view count
    pub views: u64,

    /// High quality thumbnail derived from the video id
    pub thumbnail_url: String,

    /// Source platform
    pub platform: String,
}

impl VideoMetadata {
    /// Create a record for `video_id` populated entirely with defaults
    pub fn with_defaults(video_id: &str) -> Self {
        Self {
            video_id: video_id.to_string(),
            title: DEFAULT_TITLE.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            duration: DEFAULT_DURATION,
            views: DEFAULT_VIEWS,
            thumbnail_url: thumbnail_url(video_id),
            platform: PLATFORM.to_string(),
        }
    }

    /// Set title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Set duration in seconds
    pub fn with_duration(mut self, duration: u64) -> Self {
        self.duration = duration;
        self
    }

    /// Set view count
    pub fn with_views(mut self, views: u64) -> Self {
        self.views = views;
        self
    }

    /// Whole minutes of runtime
    pub fn duration_minutes(&self) -> u64 {
        self.duration / 60
    }

    /// Get formatted duration string
    pub fn duration_formatted(&self) -> String {
        let hours = self.duration / 3600;
        let minutes = (self.duration % 3600) / 60;
        let seconds = self.duration % 60;

        if hours > 0 {
            format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
        } else {
            format!("{:02}:{:02}", minutes, seconds)
        }
    }

    /// View count with thousands separators
    pub fn views_formatted(&self) -> String {
        let digits = self.views.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }
}

/// Thumbnail URL for a video id
pub fn thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{}/hqdefault.jpg", video_id)
}
