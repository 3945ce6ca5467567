//! Prompt construction for SEO insight generation

use seo_core::insights::{MAX_FLAWS, MAX_TIMESTAMPS, MIN_FLAWS, MIN_TIMESTAMPS, TAG_COUNT};
use seo_core::{Result, SeoError, VideoMetadata};
use tracing::{debug, error};

/// System instruction sent with every completion request
pub const SYSTEM_PROMPT: &str = "Return ONLY valid JSON. No extra text";

/// Number of timestamps to request for a video of `duration_seconds`
///
/// One marker per two whole minutes, truncated, kept within 5..=15.
pub fn timestamp_count(duration_seconds: u64) -> usize {
    let minutes = duration_seconds / 60;
    ((minutes / 2) as usize).clamp(MIN_TIMESTAMPS, MAX_TIMESTAMPS)
}

/// Build the user prompt for a video
pub fn build_prompt(metadata: &VideoMetadata) -> Result<String> {
    if metadata.title.trim().is_empty() {
        error!("Error while building prompt: title is missing");
        return Err(SeoError::PromptBuild("metadata has no title".to_string()));
    }
    if metadata.platform.trim().is_empty() {
        error!("Error while building prompt: platform is missing");
        return Err(SeoError::PromptBuild("metadata has no platform".to_string()));
    }

    let num_timestamps = timestamp_count(metadata.duration);
    debug!(
        "Building prompt for {} ({}s, {} timestamps)",
        metadata.video_id, metadata.duration, num_timestamps
    );

    Ok(format!(
        r#"You MUST respond with VALID JSON ONLY. No extra text.

The video:
Title: "{title}"
Platform: {platform}
Duration: {duration} seconds

Return JSON EXACTLY in this format:

{{
  "tags": ["tag1", ..., "tag{tag_count}"],
  "audience": "Short paragraph describing the target audience...",
  "timestamps": [
    {{"time": "00:00", "description": "Intro"}},
    ...
  ],
  "flaws": [
    {{
      "issue": "Problem or flaw identified",
      "why_it_hurts": "Why this flaw reduces rank or performance",
      "fix": "Clear actionable improvement"
    }},
    ...
  ]
}}

Rules:
- EXACTLY **{tag_count}** SEO tags.
- Generate **{num_timestamps} timestamps**, each "time" formatted as MM:SS.
- Generate **{min_flaws}-{max_flaws} flaws** in the 'flaws' array.
- Everything MUST be in English."#,
        title = metadata.title,
        platform = metadata.platform,
        duration = metadata.duration,
        tag_count = TAG_COUNT,
        num_timestamps = num_timestamps,
        min_flaws = MIN_FLAWS,
        max_flaws = MAX_FLAWS,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_count_bounds() {
        assert_eq!(timestamp_count(0), 5);
        assert_eq!(timestamp_count(120), 5);
        assert_eq!(timestamp_count(600), 5);
        assert_eq!(timestamp_count(1800), 15);
        assert_eq!(timestamp_count(7200), 15);
    }

    #[test]
    fn test_timestamp_count_truncates_odd_minutes() {
        // 23 minutes -> 11.5 -> 11
        assert_eq!(timestamp_count(22 * 60), 11);
        assert_eq!(timestamp_count(23 * 60), 11);
        assert_eq!(timestamp_count(29 * 60), 14);
        // Seconds past the last whole minute are ignored
        assert_eq!(timestamp_count(22 * 60 + 59), 11);
    }

    #[test]
    fn test_prompt_embeds_metadata() {
        let metadata = VideoMetadata::with_defaults("abcdefghijk")
            .with_title("Learn Rust Fast")
            .with_duration(1800);

        let prompt = build_prompt(&metadata).unwrap();

        assert!(prompt.contains("Title: \"Learn Rust Fast\""));
        assert!(prompt.contains("Platform: Youtube"));
        assert!(prompt.contains("Duration: 1800 seconds"));
        assert!(prompt.contains("EXACTLY **35** SEO tags"));
        assert!(prompt.contains("Generate **15 timestamps**"));
        assert!(prompt.contains("**2-3 flaws**"));
        assert!(prompt.contains("English"));
    }

    #[test]
    fn test_prompt_requires_title() {
        let metadata = VideoMetadata::with_defaults("abcdefghijk").with_title("  ");
        let err = build_prompt(&metadata).unwrap_err();
        assert!(matches!(err, SeoError::PromptBuild(_)));
    }
}
