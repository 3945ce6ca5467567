//! Model reply parsing

use seo_core::{Result, SeoError};
use serde_json::Value;
use tracing::{debug, error, warn};

/// Parse the model's reply as JSON
///
/// The whole text is tried first. If that fails, the span from the first `{`
/// to the last `}` is tried, which recovers replies wrapped in prose or code
/// fences. Nothing beyond that is attempted.
pub fn parse_response(raw: &str) -> Result<Value> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => return Ok(value),
        Err(e) => debug!("Strict JSON parse failed ({}), trying brace extraction", e),
    }

    let Some(candidate) = outer_braces(raw) else {
        error!("Failed to parse JSON: no object found in model output");
        return Err(SeoError::Parse("no JSON object found in model output".to_string()));
    };

    match serde_json::from_str::<Value>(candidate) {
        Ok(value) => {
            warn!("Recovered JSON from surrounding text");
            Ok(value)
        }
        Err(e) => {
            error!("Failed to parse JSON: {}", e);
            Err(SeoError::Parse(e.to_string()))
        }
    }
}

/// Substring from the first `{` to the last `}`, inclusive
fn outer_braces(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}
