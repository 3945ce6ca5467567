//! Video page handling
//!
//! Resolves video ids from user URLs and scrapes public metadata from the
//! watch page.

pub mod fetcher;
pub mod page_source;
pub mod resolver;

// Re-export main types
pub use fetcher::{extract_metadata, MetadataFetcher};
pub use page_source::{HttpPageSource, PageResponse, PageSource};
pub use resolver::{resolve, watch_url};
