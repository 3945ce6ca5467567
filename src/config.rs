use anyhow::{anyhow, Context, Result};
use seo_llm::{LLMConfig, ValidationLevel};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the SEO insights generator
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Watch-page fetch settings
    pub fetch: FetchConfig,

    /// Completion service settings
    pub llm: LLMConfig,

    /// Output strictness for model replies
    pub validation: ValidationConfig,

    /// Output and logging settings
    pub output: OutputConfig,

    /// HTTP API settings
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Watch-page base URL; the video id is appended as `?v=`
    pub watch_url: String,

    /// User agent sent with the page request
    pub user_agent: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ValidationConfig {
    /// Lenient only checks top-level keys; strict also checks counts
    pub level: ValidationLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Log filter directive
    pub log_level: String,

    /// Print JSON instead of text
    pub json: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,

    /// Port for the HTTP API
    pub port: u16,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            watch_url: "https://www.youtube.com/watch".to_string(),
            user_agent: "Mozilla/5.0".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            log_level: "seo_insights=info,seo_llm=info,warn".to_string(),
            json: false,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Config {
    /// Load configuration from the first config file found, then apply
    /// environment overrides
    pub fn load() -> Result<Self> {
        let mut config_paths = vec![
            PathBuf::from("seo-insights.toml"),
            PathBuf::from("config/seo-insights.toml"),
        ];
        if let Ok(home) = std::env::var("HOME") {
            config_paths.push(PathBuf::from(home).join(".config/seo-insights/config.toml"));
        }
        config_paths.push(PathBuf::from("/etc/seo-insights/config.toml"));

        for path in &config_paths {
            if !path.exists() {
                continue;
            }
            match Self::load_from(path) {
                Ok(config) => return Ok(config),
                Err(e) => tracing::warn!("Failed to parse config file {}: {}", path.display(), e),
            }
        }

        Self::from_env()
    }

    /// Load configuration from a specific file, then apply environment overrides
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        tracing::info!("📄 Loaded configuration from: {}", path.display());
        Ok(config.with_env_overrides())
    }

    /// Defaults with environment overrides applied
    pub fn from_env() -> Result<Self> {
        Ok(Self::default().with_env_overrides())
    }

    /// Override settings from environment variables
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        self = self.with_api_key(lookup("OPENAI_API_KEY"));

        if let Some(model) = lookup("SEO_INSIGHTS_MODEL") {
            self.llm = self.llm.with_model(model);
        }

        if let Some(endpoint) = lookup("SEO_INSIGHTS_ENDPOINT") {
            self.llm = self.llm.with_endpoint(endpoint);
        }

        if let Some(strict) = lookup("SEO_INSIGHTS_STRICT") {
            if matches!(strict.to_lowercase().as_str(), "1" | "true" | "yes") {
                self.validation.level = ValidationLevel::Strict;
            }
        }

        if let Some(log_level) = lookup("SEO_INSIGHTS_LOG_LEVEL") {
            self.output.log_level = log_level;
        }

        if let Some(port) = lookup("SEO_INSIGHTS_PORT") {
            self.server.port = port.parse().unwrap_or(self.server.port);
        }

        self
    }

    /// Replace the credential, ignoring an absent or blank key
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        if let Some(api_key) = api_key.filter(|key| !key.trim().is_empty()) {
            self.llm = self.llm.with_api_key(Some(api_key));
        }
        self
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let config_str = toml::to_string_pretty(self)?;
        std::fs::write(path, config_str)?;
        tracing::info!("💾 Configuration saved to: {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.fetch.timeout_seconds == 0 {
            return Err(anyhow!("fetch.timeout_seconds must be greater than 0"));
        }

        if self.fetch.watch_url.trim().is_empty() {
            return Err(anyhow!("fetch.watch_url must not be empty"));
        }

        if self.llm.timeout_seconds() == 0 {
            return Err(anyhow!("llm.timeout_seconds must be greater than 0"));
        }

        if !(0.0..=2.0).contains(&self.llm.temperature()) {
            return Err(anyhow!("llm.temperature must be between 0.0 and 2.0"));
        }

        if self.llm.model().trim().is_empty() {
            return Err(anyhow!("llm.model must not be empty"));
        }

        if self.llm.endpoint().trim().is_empty() {
            return Err(anyhow!("llm.endpoint must not be empty"));
        }

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }

    /// Get runtime configuration summary
    pub fn summary(&self) -> String {
        format!(
            "SEO Insights Configuration:\n\
            - Fetch timeout: {}s\n\
            - Model: {}\n\
            - Endpoint: {}\n\
            - Completion timeout: {}s\n\
            - API key: {}\n\
            - Validation: {:?}",
            self.fetch.timeout_seconds,
            self.llm.model(),
            self.llm.endpoint(),
            self.llm.timeout_seconds(),
            if self.llm.api_key().is_some() { "set" } else { "missing" },
            self.validation.level,
        )
    }
}

/// Configuration builder for programmatic config creation
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.config.llm = self.config.llm.with_api_key(Some(api_key));
        self
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.config.llm = self.config.llm.with_model(model);
        self
    }

    pub fn with_fetch_timeout(mut self, seconds: u64) -> Self {
        self.config.fetch.timeout_seconds = seconds;
        self
    }

    pub fn with_validation(mut self, level: ValidationLevel) -> Self {
        self.config.validation.level = level;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
