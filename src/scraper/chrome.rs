use std::time::Instant;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use futures::FutureExt;
use url::Url;

use crate::app::{Result, SiteFeedError};
use crate::browser::{BrowserSession, Coordinator};
use crate::domain::FeedRequest;
use crate::feed::FeedDocument;
use crate::scraper::config::ScraperConfig;
use crate::scraper::extractor::ItemExtractor;
use crate::scraper::Scraper;

/// Chrome-based scraper that renders pages on the shared browser worker
pub struct ChromeScraper {
    coordinator: Coordinator<BrowserSession>,
    config: ScraperConfig,
}

impl ChromeScraper {
    /// Launch the browser on a dedicated worker and wrap it in a scraper.
    ///
    /// Fails if Chrome cannot be started; the caller should not serve feeds then.
    pub fn launch(config: ScraperConfig) -> Result<Self> {
        let launch_config = config.clone();
        let coordinator = Coordinator::start(move || async move {
            BrowserSession::launch(&launch_config).await
        })?;

        Ok(Self::new(coordinator, config))
    }

    pub fn new(coordinator: Coordinator<BrowserSession>, config: ScraperConfig) -> Self {
        Self {
            coordinator,
            config,
        }
    }

    async fn render(&self, url: &str) -> Result<String> {
        let url = url.to_string();
        let config = self.config.clone();

        self.coordinator
            .run(move |session: &mut BrowserSession| {
                async move { session.render(&url, &config).await }.boxed_local()
            })
            .await
    }
}

#[async_trait]
impl Scraper for ChromeScraper {
    async fn scrape(&self, request: &FeedRequest) -> Result<Bytes> {
        let page_url = parse_page_url(&request.url)?;

        let started = Instant::now();
        let html = self.render(&request.url).await?;
        tracing::info!(
            "Rendered {} ({} bytes) in {:?}",
            request.url,
            html.len(),
            started.elapsed()
        );

        let extractor = ItemExtractor::new(
            &request.item_selector,
            &request.title_selector,
            self.config.item_limit(),
        )?;
        let emitted_at = Utc::now();
        let entries = extractor.extract(&html, &page_url, emitted_at);
        tracing::debug!("Extracted {} entries from {}", entries.len(), request.url);

        FeedDocument::for_source(&request.url, entries, emitted_at).to_xml()
    }
}

/// Requests reach the scraper already validated; this only recovers the parsed form.
fn parse_page_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| SiteFeedError::Navigation(format!("{}: {}", url, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_url() {
        let url = parse_page_url("https://example.com/news?page=2").unwrap();
        assert_eq!(url.path(), "/news");

        let err = parse_page_url("not a url").unwrap_err();
        assert!(matches!(err, SiteFeedError::Navigation(_)));
    }
}
