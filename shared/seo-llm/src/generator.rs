//! Insight generation: prompt, completion, parse, validate

use crate::parser::parse_response;
use crate::prompt::build_prompt;
use crate::providers::CompletionClient;
use crate::validation::{validate_contract, validate_schema};
use crate::ValidationLevel;
use seo_core::{InsightsResult, Result, SeoError, VideoMetadata};
use tracing::{error, info};

/// Turns video metadata into SEO insights through a completion client
pub struct InsightGenerator {
    client: Box<dyn CompletionClient>,
    level: ValidationLevel,
}

impl std::fmt::Debug for InsightGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsightGenerator")
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

impl InsightGenerator {
    /// Create a generator with lenient validation
    pub fn new(client: Box<dyn CompletionClient>) -> Self {
        Self {
            client,
            level: ValidationLevel::default(),
        }
    }

    /// Set validation strictness
    pub fn with_validation(mut self, level: ValidationLevel) -> Self {
        self.level = level;
        self
    }

    /// Get validation strictness
    pub fn validation(&self) -> ValidationLevel {
        self.level
    }

    /// Generate insights for a video
    ///
    /// Any stage failure stops the run and is returned wrapped in
    /// [`SeoError::Generation`]; partial results are never returned.
    pub async fn generate(&self, metadata: &VideoMetadata) -> Result<InsightsResult> {
        info!(
            "🤖 Starting SEO insights generation for {} with {}",
            metadata.video_id,
            self.client.model()
        );

        match self.run(metadata).await {
            Ok(insights) => {
                info!(
                    "✅ Generated {} tags, {} timestamps, {} flaws",
                    insights.tags.len(),
                    insights.timestamps.len(),
                    insights.flaws.len()
                );
                Ok(insights)
            }
            Err(e) => {
                error!("Insight generation failed for {}: {}", metadata.video_id, e);
                Err(SeoError::generation(e))
            }
        }
    }

    async fn run(&self, metadata: &VideoMetadata) -> Result<InsightsResult> {
        let prompt = build_prompt(metadata)?;
        let raw = self.client.complete(&prompt).await?;
        let data = parse_response(&raw)?;
        validate_schema(&data)?;

        let insights: InsightsResult = serde_json::from_value(data).map_err(|e| {
            error!("AI output has unexpected shape: {}", e);
            SeoError::Shape(e.to_string())
        })?;

        validate_contract(&insights, self.level)?;
        Ok(insights)
    }
}
