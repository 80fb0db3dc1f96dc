pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;

pub use http_fetcher::HttpFetcher;

/// A page fetched without a browser
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// HTTP status of the response; non-success statuses are not errors
    pub status: u16,
    /// Decoded response body
    pub body: String,
}

#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;
}
