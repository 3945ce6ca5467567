//! HTTP transport for watch-page fetches
use async_trait::async_trait;
use reqwest::Client;
use seo_core::{Result, SeoError};
use std::time::Duration;
use tracing::{debug, error};

/// A fetched page: status code and body text
#[derive(Debug, Clone)]
pub struct PageResponse {
    pub status: u16,
    pub body: String,
}

impl PageResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Source of HTML pages
///
/// Each `get` is exactly one request; implementations never retry.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn get(&self, url: &str) -> Result<PageResponse>;
}

/// reqwest-backed page source with a fixed user agent and timeout
#[derive(Clone)]
pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    /// Create a new page source
    pub fn new(user_agent: &str, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(user_agent)
            .build()
            .map_err(|e| SeoError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn get(&self, url: &str) -> Result<PageResponse> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            error!("Request to {} failed: {}", url, e);
            SeoError::Fetch {
                url: url.to_string(),
                reason: if e.is_timeout() {
                    "request timed out".to_string()
                } else {
                    e.to_string()
                },
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read body from {}: {}", url, e);
            SeoError::Fetch {
                url: url.to_string(),
                reason: format!("failed to read body: {}", e),
            }
        })?;

        debug!("📄 Downloaded {} characters of HTML content", body.len());
        Ok(PageResponse { status, body })
    }
}
