use std::sync::Arc;

use bytes::Bytes;

use crate::app::error::Result;
use crate::cache::FeedCache;
use crate::config::Config;
use crate::domain::FeedRequest;
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::preview::PreviewRenderer;
use crate::scraper::{ChromeScraper, Scraper};
use crate::validate;

pub struct AppContext {
    pub cache: Arc<FeedCache>,
    pub scraper: Arc<dyn Scraper>,
    pub preview: PreviewRenderer,
}

impl AppContext {
    /// Launch the shared browser and wire all components from `config`.
    ///
    /// Must be called once, before the HTTP listener is started.
    pub fn launch(config: &Config) -> Result<Self> {
        let scraper: Arc<dyn Scraper> = Arc::new(ChromeScraper::launch(config.scraper.clone())?);
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(
            config.preview.timeout(),
            &config.preview.user_agent,
        )?);
        let cache = Arc::new(FeedCache::new(config.cache.ttl()));

        Ok(Self::new(scraper, fetcher, cache))
    }

    pub fn new(
        scraper: Arc<dyn Scraper>,
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        cache: Arc<FeedCache>,
    ) -> Self {
        Self {
            cache,
            scraper,
            preview: PreviewRenderer::new(fetcher),
        }
    }

    /// Serve a feed from cache or scrape it. Only successful results are cached.
    pub async fn feed(&self, request: &FeedRequest) -> Result<Bytes> {
        validate::check(&request.url)?;

        let key = request.cache_key();
        if let Some(body) = self.cache.get(&key) {
            tracing::debug!("Cache hit for {}", key);
            return Ok(body);
        }

        let body = self.scraper.scrape(request).await?;
        self.cache.put(key, body.clone());
        Ok(body)
    }

    /// Render the live preview of `url`.
    pub async fn preview(&self, url: &str) -> Result<String> {
        validate::check(url)?;
        self.preview.render(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SiteFeedError;
    use crate::fetcher::FetchedPage;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingScraper {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Scraper for CountingScraper {
        async fn scrape(&self, _request: &FeedRequest) -> Result<Bytes> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Bytes::from_static(b"<rss/>"))
        }
    }

    struct UnreachableFetcher;

    #[async_trait]
    impl Fetcher for UnreachableFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedPage> {
            panic!("fetch of {url} should have been rejected")
        }
    }

    fn context(scraper: Arc<CountingScraper>) -> AppContext {
        AppContext::new(scraper, Arc::new(UnreachableFetcher), Arc::new(FeedCache::default()))
    }

    #[tokio::test]
    async fn test_feed_rejects_blocked_url_before_scraping() {
        let scraper = Arc::new(CountingScraper::default());
        let ctx = context(scraper.clone());

        let request = FeedRequest::new("http://localhost:5000/", "li", "h2");
        let err = ctx.feed(&request).await.unwrap_err();

        assert!(matches!(err, SiteFeedError::Validation(_)));
        assert_eq!(scraper.calls.load(Ordering::SeqCst), 0);
        assert!(ctx.cache.is_empty());
    }

    #[tokio::test]
    async fn test_feed_caches_successful_scrape() {
        let scraper = Arc::new(CountingScraper::default());
        let ctx = context(scraper.clone());
        let request = FeedRequest::new("https://example.com/", "li", "h2");

        ctx.feed(&request).await.unwrap();
        ctx.feed(&request).await.unwrap();

        assert_eq!(scraper.calls.load(Ordering::SeqCst), 1);
        assert_eq!(ctx.cache.len(), 1);
    }

    #[tokio::test]
    async fn test_preview_rejects_blocked_url_before_fetching() {
        let ctx = context(Arc::default());
        let err = ctx.preview("http://127.0.0.1/").await.unwrap_err();
        assert!(matches!(err, SiteFeedError::Validation(_)));
    }
}
