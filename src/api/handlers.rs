//! API request handlers

use axum::http::StatusCode;
use seo_core::{Result, SeoError, VideoMetadata};
use seo_llm::ValidationLevel;
use serde_json::Value;
use tracing::{error, info};

use super::models::{InsightsRequest, MetadataRequest};
use crate::format::failure_notice;
use crate::processing::{InsightPipeline, PipelineOutput};

/// Handle health check requests
pub async fn health_check() -> Value {
    serde_json::json!({
        "status": "healthy",
        "service": "seo-insights",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    })
}

/// Handle metadata lookups
pub async fn get_metadata(
    pipeline: &InsightPipeline,
    request: &MetadataRequest,
) -> Result<VideoMetadata> {
    info!("📥 Metadata request for {}", request.url);
    pipeline.metadata(request.url.trim()).await
}

/// Handle insight generation requests
pub async fn generate_insights(
    pipeline: &InsightPipeline,
    request: &InsightsRequest,
) -> Result<PipelineOutput> {
    info!("📥 Insights request for {}", request.url);

    let level = match request.strict {
        Some(true) => ValidationLevel::Strict,
        Some(false) => ValidationLevel::Lenient,
        None => pipeline.validation(),
    };

    pipeline
        .run_with(request.url.trim(), request.api_key.clone(), level)
        .await
        .map_err(|e| {
            error!("❌ Insights request for {} failed: {}", request.url, e);
            e
        })
}

/// HTTP status for a failed request
pub fn status_for(error: &SeoError) -> StatusCode {
    if error.is_bad_input() {
        StatusCode::BAD_REQUEST
    } else if error.is_client_unavailable() {
        StatusCode::UNAUTHORIZED
    } else {
        StatusCode::BAD_GATEWAY
    }
}

/// Message returned to the caller for a failed request
pub fn message_for(error: &SeoError) -> String {
    if error.is_bad_input() {
        error.root_cause().to_string()
    } else {
        failure_notice(error).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{GENERIC_NOTICE, MISSING_KEY_NOTICE};

    #[tokio::test]
    async fn test_health_check() {
        let health = health_check().await;
        assert_eq!(health["status"], "healthy");
        assert_eq!(health["service"], "seo-insights");
    }

    #[test]
    fn test_status_mapping() {
        let bad_url = SeoError::NoMatch("https://example.com/".to_string());
        assert_eq!(status_for(&bad_url), StatusCode::BAD_REQUEST);

        let no_key = SeoError::generation(SeoError::ClientUnavailable("no key".to_string()));
        assert_eq!(status_for(&no_key), StatusCode::UNAUTHORIZED);

        let upstream = SeoError::generation(SeoError::Parse("bad json".to_string()));
        assert_eq!(status_for(&upstream), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_messages_hide_upstream_details() {
        let no_key = SeoError::ClientUnavailable("no key".to_string());
        assert_eq!(message_for(&no_key), MISSING_KEY_NOTICE);

        let upstream = SeoError::Completion("401 from provider: sk-secret".to_string());
        assert_eq!(message_for(&upstream), GENERIC_NOTICE);

        let empty = SeoError::InvalidInput("URL must not be empty".to_string());
        assert!(message_for(&empty).contains("must not be empty"));
    }
}
