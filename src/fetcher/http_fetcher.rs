use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::app::{Result, SiteFeedError};
use crate::fetcher::{FetchedPage, Fetcher};

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent(user_agent)
            .build()
            .map_err(|e| SiteFeedError::Fetch(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SiteFeedError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Preview fetch of {} returned {}", url, status);
        }

        let body = response
            .text()
            .await
            .map_err(|e| SiteFeedError::Fetch(e.to_string()))?;

        Ok(FetchedPage {
            status: status.as_u16(),
            body,
        })
    }
}
