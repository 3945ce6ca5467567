//! Generated SEO insights

use serde::{Deserialize, Serialize};

/// Top-level keys every model reply must carry, in validation order
pub const REQUIRED_KEYS: [&str; 4] = ["tags", "audience", "timestamps", "flaws"];

/// Number of tags requested from the model
pub const TAG_COUNT: usize = 35;

/// Inclusive bounds on the number of timestamps requested
pub const MIN_TIMESTAMPS: usize = 5;
pub const MAX_TIMESTAMPS: usize = 15;

/// Inclusive bounds on the number of flaws requested
pub const MIN_FLAWS: usize = 2;
pub const MAX_FLAWS: usize = 3;

/// A suggested chapter marker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Timestamp {
    /// Position in `MM:SS` form
    pub time: String,
    pub description: String,
}

/// A weakness in the video's SEO and how to address it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flaw {
    pub issue: String,
    pub why_it_hurts: String,
    pub fix: String,
}

/// Structured insights decoded from the model's JSON reply
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InsightsResult {
    pub tags: Vec<String>,
    pub audience: String,
    pub timestamps: Vec<Timestamp>,
    pub flaws: Vec<Flaw>,
}

impl InsightsResult {
    /// Tags as a single copy-ready hashtag line
    pub fn hashtags(&self) -> String {
        self.tags
            .iter()
            .map(|tag| format!("#{}", tag.trim()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
