//! API data models

use serde::{Deserialize, Serialize};

/// API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// Body for `POST /api/metadata`
#[derive(Debug, Serialize, Deserialize)]
pub struct MetadataRequest {
    pub url: String,
}

/// Body for `POST /api/insights`
#[derive(Debug, Serialize, Deserialize)]
pub struct InsightsRequest {
    pub url: String,
    /// Credential for this request; falls back to the server's own
    #[serde(default)]
    pub api_key: Option<String>,
    /// Enforce tag, timestamp and flaw counts
    #[serde(default)]
    pub strict: Option<bool>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}
