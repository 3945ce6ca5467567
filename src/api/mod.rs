//! API module for the SEO insights generator
//!
//! Exposes metadata lookups and insight generation over HTTP.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::processing::InsightPipeline;

pub mod handlers;
pub mod models;
pub mod server;

/// API server wrapping a shared pipeline
pub struct ApiServer {
    pipeline: Arc<InsightPipeline>,
    config: Arc<Config>,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(pipeline: Arc<InsightPipeline>, config: Arc<Config>) -> Self {
        Self { pipeline, config }
    }

    /// Start the API server
    pub async fn start(self) -> Result<()> {
        info!("🚀 Starting API server on port {}", self.config.server.port);
        server::start_http_server(self.pipeline, self.config).await
    }
}
