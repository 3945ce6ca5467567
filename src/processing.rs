use chrono::{DateTime, Utc};
use seo_core::{InsightsResult, Result, VideoMetadata};
use seo_llm::{create_generator, InsightGenerator, LLMConfig, ValidationLevel};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{error, info};

use crate::config::Config;
use crate::video::MetadataFetcher;

/// Metadata and insights for one URL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub metadata: VideoMetadata,
    pub insights: InsightsResult,
    pub generated_at: DateTime<Utc>,
}

/// URL in, metadata and insights out
///
/// Steps run strictly one after another; a failure at any step ends the run.
pub struct InsightPipeline {
    fetcher: MetadataFetcher,
    llm: LLMConfig,
    level: ValidationLevel,
}

impl InsightPipeline {
    /// Build a pipeline from configuration
    ///
    /// The completion client is only constructed when insights are requested,
    /// so metadata lookups work without a credential.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            fetcher: MetadataFetcher::new(&config.fetch)?,
            llm: config.llm.clone(),
            level: config.validation.level,
        })
    }

    /// Build a pipeline around an existing fetcher
    pub fn with_fetcher(fetcher: MetadataFetcher, llm: LLMConfig, level: ValidationLevel) -> Self {
        Self { fetcher, llm, level }
    }

    /// True when a completion credential is configured
    pub fn has_credential(&self) -> bool {
        self.llm.api_key().is_some()
    }

    /// Fetch metadata for a URL
    pub async fn metadata(&self, url: &str) -> Result<VideoMetadata> {
        self.fetcher.fetch_for_url(url).await.map_err(|e| {
            error!("Error while processing {}: {}", url, e);
            e
        })
    }

    /// Configured validation strictness
    pub fn validation(&self) -> ValidationLevel {
        self.level
    }

    /// Create the generator for the configured completion service
    pub fn generator(&self) -> Result<InsightGenerator> {
        create_generator(&self.llm, self.level)
    }

    /// Create a generator with a per-call credential and strictness
    ///
    /// A blank `api_key` falls back to the configured credential.
    pub fn generator_with(
        &self,
        api_key: Option<String>,
        level: ValidationLevel,
    ) -> Result<InsightGenerator> {
        match api_key.filter(|key| !key.trim().is_empty()) {
            Some(key) => create_generator(&self.llm.clone().with_api_key(Some(key)), level),
            None => create_generator(&self.llm, level),
        }
    }

    /// Fetch metadata and generate insights for a URL
    pub async fn run(&self, url: &str) -> Result<PipelineOutput> {
        self.run_with(url, None, self.level).await
    }

    /// Like [`run`](Self::run), with a per-call credential and strictness
    pub async fn run_with(
        &self,
        url: &str,
        api_key: Option<String>,
        level: ValidationLevel,
    ) -> Result<PipelineOutput> {
        let start_time = Instant::now();

        let generator = self.generator_with(api_key, level)?;
        let metadata = self.metadata(url).await?;
        let insights = generator.generate(&metadata).await?;

        info!(
            "🎉 Insights for {} ready in {:.2}s",
            metadata.video_id,
            start_time.elapsed().as_secs_f64()
        );

        Ok(PipelineOutput {
            metadata,
            insights,
            generated_at: Utc::now(),
        })
    }
}
