//! # sitefeed
//!
//! Turns a web page into an RSS feed by rendering it in headless Chrome
//! and picking repeating items with CSS selectors.
//!
//! ## Architecture
//!
//! ```text
//! GET /feed    → validate → cache → Coordinator → BrowserSession → extractor → RSS
//! GET /preview → validate → HttpFetcher → absolutize + picker script
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! sitefeed serve --port 5000
//! curl 'http://localhost:5000/feed?url=https://example.com/news&item=li.story&title=h2'
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) wires the cache, scraper and preview
/// renderer together and implements the feed pipeline.
pub mod app;

/// The process-wide browser and the worker thread that owns it.
///
/// - [`BrowserSession`](browser::BrowserSession): one Chrome per process
/// - [`Coordinator`](browser::Coordinator): serializes work onto the browser thread
pub mod browser;

/// Time-bounded in-memory feed cache.
pub mod cache;

/// Command-line interface using clap.
pub mod cli;

/// Configuration loaded from TOML at startup.
pub mod config;

/// Core domain models: [`FeedRequest`](domain::FeedRequest), entries and channel metadata.
pub mod domain;

/// RSS 2.0 document assembly.
pub mod feed;

/// Plain HTTP fetching for previews.
pub mod fetcher;

/// Axum routes, handlers and server.
pub mod http;

/// Raw-HTML preview with absolute URLs and the selector picker script.
pub mod preview;

/// Browser-backed list scraping.
///
/// - [`ChromeScraper`](scraper::ChromeScraper): renders on the shared browser
/// - [`ItemExtractor`](scraper::ItemExtractor): selector-based entry extraction
/// - [`Scraper`](scraper::Scraper): async trait for scraping implementations
pub mod scraper;

/// Target URL validation.
pub mod validate;
