//! SEO Core - Shared data structures and error kinds for insight generation

pub mod insights;
pub mod metadata;

pub use insights::{Flaw, InsightsResult, Timestamp, REQUIRED_KEYS};
pub use metadata::VideoMetadata;

/// Result type for SEO insight operations
pub type Result<T> = std::result::Result<T, SeoError>;

/// Error kinds shared by every stage of the pipeline
#[derive(thiserror::Error, Debug)]
pub enum SeoError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not a valid video URL: {0}")]
    NoMatch(String),

    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Completion client unavailable: {0}")]
    ClientUnavailable(String),

    #[error("Completion request failed: {0}")]
    Completion(String),

    #[error("Failed to parse JSON: {0}")]
    Parse(String),

    #[error("AI output missing the '{0}' key")]
    Schema(String),

    #[error("AI output violates the output contract: {0}")]
    Contract(String),

    #[error("AI output has an unexpected shape: {0}")]
    Shape(String),

    #[error("Error while building prompt: {0}")]
    PromptBuild(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Insight generation failed: {0}")]
    Generation(#[source] Box<SeoError>),
}

impl SeoError {
    /// Wrap a stage failure as a generation failure, without double wrapping
    pub fn generation(cause: SeoError) -> Self {
        match cause {
            SeoError::Generation(_) => cause,
            other => SeoError::Generation(Box::new(other)),
        }
    }

    /// The innermost error, looking through generation wrappers
    pub fn root_cause(&self) -> &SeoError {
        match self {
            SeoError::Generation(inner) => inner.root_cause(),
            other => other,
        }
    }

    /// True when the failure was caused by a missing service credential
    pub fn is_client_unavailable(&self) -> bool {
        matches!(self.root_cause(), SeoError::ClientUnavailable(_))
    }

    /// True when the caller supplied an unusable URL
    pub fn is_bad_input(&self) -> bool {
        matches!(
            self.root_cause(),
            SeoError::InvalidInput(_) | SeoError::NoMatch(_)
        )
    }
}
