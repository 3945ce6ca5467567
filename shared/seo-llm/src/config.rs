//! LLM configuration

use serde::{Deserialize, Serialize};

/// Chat completions endpoint used when none is configured
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Output strictness applied to the model's reply
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ValidationLevel {
    /// Only the four top-level keys are required
    #[default]
    Lenient,
    /// Tag, timestamp and flaw counts must match what the prompt asked for
    Strict,
}

/// LLM configuration
///
/// The credential lives here and is handed to the client at construction
/// time; nothing reads it from process state afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LLMConfig {
    endpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<String>,
    model: String,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    timeout_seconds: u64,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.4,
            max_tokens: None,
            timeout_seconds: 60,
        }
    }
}

impl LLMConfig {
    /// Create new LLM config
    pub fn new() -> Self {
        Self::default()
    }

    /// Get endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Set endpoint
    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Get API key, treating an empty or blank key as absent
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Set API key
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Get model
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Set model
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Get temperature
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Get max tokens
    pub fn max_tokens(&self) -> Option<u32> {
        self.max_tokens
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Get timeout
    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }
}
