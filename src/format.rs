//! Plain-text rendering of metadata and insights

use seo_core::{InsightsResult, SeoError, VideoMetadata};

/// Notice shown when no completion credential is available
pub const MISSING_KEY_NOTICE: &str = "Add the API key first";

/// Notice shown for any other failure; details go to the log
pub const GENERIC_NOTICE: &str = "Something went wrong while generating insights; check the logs for details";

/// User-facing notice for a failed run
pub fn failure_notice(error: &SeoError) -> &'static str {
    if error.is_client_unavailable() {
        MISSING_KEY_NOTICE
    } else {
        GENERIC_NOTICE
    }
}

/// Render the video details block
pub fn format_metadata(metadata: &VideoMetadata) -> String {
    let mut output = String::new();
    output.push_str(&format!("# {}\n\n", metadata.title));
    output.push_str(&format!(
        "**Creator:** {} | **Duration:** {} ({} min) | **Views:** {} | **Platform:** {}\n",
        metadata.author,
        metadata.duration_formatted(),
        metadata.duration_minutes(),
        metadata.views_formatted(),
        metadata.platform
    ));
    output.push_str(&format!("**Video ID:** {}\n", metadata.video_id));
    output.push_str(&format!("**Thumbnail:** {}\n", metadata.thumbnail_url));
    output
}

/// Render tags, audience, timestamps and flaws
pub fn format_insights(insights: &InsightsResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("## Tags ({})\n\n", insights.tags.len()));
    for tag in &insights.tags {
        output.push_str(&format!("• {}\n", tag));
    }
    output.push('\n');

    output.push_str("## Copy tags\n\n");
    output.push_str(&insights.hashtags());
    output.push_str("\n\n");

    output.push_str("## Target audience\n\n");
    output.push_str(insights.audience.trim());
    output.push_str("\n\n");

    output.push_str("## Timestamps\n\n");
    for timestamp in &insights.timestamps {
        output.push_str(&format!("{} - {}\n", timestamp.time, timestamp.description));
    }
    output.push('\n');

    output.push_str("## SEO flaws\n\n");
    for (index, flaw) in insights.flaws.iter().enumerate() {
        output.push_str(&format!("### {}. {}\n\n", index + 1, flaw.issue));
        output.push_str(&format!("**Why it hurts:** {}\n\n", flaw.why_it_hurts));
        output.push_str(&format!("**Fix:** {}\n\n", flaw.fix));
    }

    output
}

/// Full report: video details followed by insights
pub fn format_report(metadata: &VideoMetadata, insights: &InsightsResult) -> String {
    format!("{}\n{}", format_metadata(metadata), format_insights(insights))
}
