//! SEO LLM - prompt construction, completion and reply handling for SEO insights

pub mod config;
pub mod generator;
pub mod parser;
pub mod prompt;
pub mod providers;
pub mod validation;

pub use config::{LLMConfig, ValidationLevel};
pub use generator::InsightGenerator;
pub use parser::parse_response;
pub use prompt::{build_prompt, timestamp_count, SYSTEM_PROMPT};
pub use providers::{ChatMessage, CompletionClient, OpenAIClient};
pub use validation::{validate_contract, validate_schema};

/// Create a generator backed by the configured OpenAI-compatible endpoint
pub fn create_generator(
    config: &LLMConfig,
    level: ValidationLevel,
) -> seo_core::Result<InsightGenerator> {
    let client = OpenAIClient::new(config.clone())?;
    Ok(InsightGenerator::new(Box::new(client)).with_validation(level))
}
