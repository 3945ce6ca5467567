//! Output contract checks for decoded model replies

use crate::ValidationLevel;
use regex::Regex;
use seo_core::insights::{
    MAX_FLAWS, MAX_TIMESTAMPS, MIN_FLAWS, MIN_TIMESTAMPS, REQUIRED_KEYS, TAG_COUNT,
};
use seo_core::{InsightsResult, Result, SeoError};
use serde_json::Value;
use std::sync::LazyLock;
use tracing::error;

static TIME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2,}:\d{2}$").expect("valid time pattern"));

/// Require the four top-level keys, reporting the first missing one
///
/// Nested shapes, types and counts are not inspected here.
pub fn validate_schema(data: &Value) -> Result<()> {
    for key in REQUIRED_KEYS {
        if data.get(key).is_none() {
            error!("AI output missing the {} key", key);
            return Err(SeoError::Schema(key.to_string()));
        }
    }
    Ok(())
}

/// Apply the configured strictness to a decoded result
pub fn validate_contract(insights: &InsightsResult, level: ValidationLevel) -> Result<()> {
    if level == ValidationLevel::Lenient {
        return Ok(());
    }

    let violation = if insights.tags.len() != TAG_COUNT {
        Some(format!("expected {} tags, got {}", TAG_COUNT, insights.tags.len()))
    } else if insights.audience.trim().is_empty() {
        Some("audience is empty".to_string())
    } else if !(MIN_TIMESTAMPS..=MAX_TIMESTAMPS).contains(&insights.timestamps.len()) {
        Some(format!(
            "expected {}-{} timestamps, got {}",
            MIN_TIMESTAMPS,
            MAX_TIMESTAMPS,
            insights.timestamps.len()
        ))
    } else if !(MIN_FLAWS..=MAX_FLAWS).contains(&insights.flaws.len()) {
        Some(format!(
            "expected {}-{} flaws, got {}",
            MIN_FLAWS,
            MAX_FLAWS,
            insights.flaws.len()
        ))
    } else {
        insights
            .timestamps
            .iter()
            .find(|ts| !TIME_PATTERN.is_match(ts.time.trim()))
            .map(|ts| format!("timestamp '{}' is not MM:SS", ts.time))
    };

    match violation {
        Some(reason) => {
            error!("AI output violates contract: {}", reason);
            Err(SeoError::Contract(reason))
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seo_core::{Flaw, Timestamp};
    use serde_json::json;

    fn conforming() -> InsightsResult {
        InsightsResult {
            tags: (0..TAG_COUNT).map(|i| format!("tag{}", i)).collect(),
            audience: "Beginner Rust developers".to_string(),
            timestamps: (0..5)
                .map(|i| Timestamp {
                    time: format!("{:02}:00", i * 2),
                    description: format!("Part {}", i),
                })
                .collect(),
            flaws: (0..2)
                .map(|i| Flaw {
                    issue: format!("issue {}", i),
                    why_it_hurts: "lower ranking".to_string(),
                    fix: "rewrite it".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_schema_passes_with_all_keys() {
        let data = json!({"tags": [], "audience": "x", "timestamps": [], "flaws": []});
        assert!(validate_schema(&data).is_ok());
    }

    #[test]
    fn test_schema_reports_missing_flaws() {
        let data = json!({"tags": [], "audience": "x", "timestamps": []});
        match validate_schema(&data) {
            Err(SeoError::Schema(key)) => assert_eq!(key, "flaws"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_schema_reports_first_missing_in_order() {
        let data = json!({"flaws": []});
        match validate_schema(&data) {
            Err(SeoError::Schema(key)) => assert_eq!(key, "tags"),
            other => panic!("unexpected result: {:?}", other),
        }

        match validate_schema(&json!(["not", "an", "object"])) {
            Err(SeoError::Schema(key)) => assert_eq!(key, "tags"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_lenient_accepts_short_output() {
        let mut insights = conforming();
        insights.tags.truncate(3);
        insights.flaws.clear();
        assert!(validate_contract(&insights, ValidationLevel::Lenient).is_ok());
    }

    #[test]
    fn test_strict_accepts_conforming_output() {
        assert!(validate_contract(&conforming(), ValidationLevel::Strict).is_ok());
    }

    #[test]
    fn test_strict_rejects_counts() {
        let mut insights = conforming();
        insights.tags.pop();
        assert!(matches!(
            validate_contract(&insights, ValidationLevel::Strict),
            Err(SeoError::Contract(_))
        ));

        let mut insights = conforming();
        insights.timestamps.truncate(4);
        assert!(matches!(
            validate_contract(&insights, ValidationLevel::Strict),
            Err(SeoError::Contract(_))
        ));

        let mut insights = conforming();
        insights.flaws = Vec::new();
        assert!(matches!(
            validate_contract(&insights, ValidationLevel::Strict),
            Err(SeoError::Contract(_))
        ));
    }

    #[test]
    fn test_strict_rejects_bad_time_format() {
        let mut insights = conforming();
        insights.timestamps[2].time = "two minutes".to_string();
        match validate_contract(&insights, ValidationLevel::Strict) {
            Err(SeoError::Contract(reason)) => assert!(reason.contains("two minutes")),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
