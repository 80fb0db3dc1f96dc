//! Browser-based list scraping that turns a page into an RSS feed.
//!
//! # Architecture
//!
//! ```text
//! FeedRequest → Coordinator → BrowserSession::render → HTML
//!             → ItemExtractor → FeedDocument → RSS bytes
//! ```
//!
//! Rendering happens on the browser worker thread. Selector matching and
//! feed serialization run on the caller's task.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sitefeed::scraper::{ChromeScraper, Scraper, ScraperConfig};
//! use sitefeed::domain::FeedRequest;
//!
//! let scraper = ChromeScraper::launch(ScraperConfig::default())?;
//! let request = FeedRequest::new("https://example.com/news", "li.story", "h2");
//! let rss = scraper.scrape(&request).await?;
//! ```
//!
//! # Known limitations
//!
//! Lazy content is triggered by a single scroll followed by a fixed settle
//! delay. Pages relying on deeper infinite scroll or late rendering may
//! produce incomplete feeds.

mod chrome;
mod config;
mod extractor;

pub use chrome::ChromeScraper;
pub use config::{ScraperConfig, DESKTOP_USER_AGENT};
pub use extractor::ItemExtractor;

use crate::app::Result;
use crate::domain::FeedRequest;
use async_trait::async_trait;
use bytes::Bytes;

/// Trait for feed-producing scraper implementations
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Render the requested page and return the serialized feed
    async fn scrape(&self, request: &FeedRequest) -> Result<Bytes>;
}
