//! SEO Insights - YouTube SEO insight generator
//!
//! Scrapes public metadata from a video's watch page and asks a chat
//! completion service for tags, an audience description, chapter
//! timestamps and SEO flaws.

pub mod config;
pub mod format;
pub mod processing;
pub mod video;

#[cfg(feature = "api")]
pub mod api;

// Re-export main types for easy access
pub use crate::config::{Config, ConfigBuilder};
pub use crate::processing::{InsightPipeline, PipelineOutput};
pub use crate::video::{resolve, MetadataFetcher};
pub use seo_core::{Flaw, InsightsResult, SeoError, Timestamp, VideoMetadata};
pub use seo_llm::{InsightGenerator, LLMConfig, ValidationLevel};
