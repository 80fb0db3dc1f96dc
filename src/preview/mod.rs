//! Raw-HTML preview used by the selector picker.
//!
//! Pages are fetched without a browser, their asset references are made
//! absolute so they render from another origin, and a small script is
//! appended that reports a selector for every clicked element to the
//! embedding window.

mod rewrite;

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::app::{Result, SiteFeedError};
use crate::fetcher::Fetcher;

pub use rewrite::absolutize;

/// Appended to every preview. Posts `{type: 'SELECTOR', value}` to the parent
/// window, where `value` is the tag name followed by the element's classes.
pub const PICKER_SCRIPT: &str = r#"
<script>
document.addEventListener('click', function(e) {
    e.preventDefault();
    e.stopPropagation();

    let el = e.target;
    let selector = el.tagName.toLowerCase();

    if (el.classList.length) {
        selector += "." + [...el.classList].join(".");
    }

    window.parent.postMessage({
        type: 'SELECTOR',
        value: selector
    }, '*');

}, true);
</script>
"#;

/// Settings for the plain HTTP fetch behind `/preview`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Request timeout in seconds (default: 15)
    pub timeout_secs: u64,

    /// User agent sent with preview requests
    pub user_agent: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            user_agent: "Mozilla/5.0".to_string(),
        }
    }
}

impl PreviewConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

pub struct PreviewRenderer {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
}

impl PreviewRenderer {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self { fetcher }
    }

    /// Fetch `url` and return its HTML with absolute asset URLs and the picker script.
    pub async fn render(&self, url: &str) -> Result<String> {
        let base = Url::parse(url).map_err(|e| SiteFeedError::Fetch(format!("{}: {}", url, e)))?;

        let page = self.fetcher.fetch(url).await?;
        tracing::debug!("Fetched {} for preview (status {})", url, page.status);

        let mut html = absolutize(&page.body, &base)?;
        html.push_str(PICKER_SCRIPT);
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::FetchedPage;
    use async_trait::async_trait;

    struct StaticFetcher {
        status: u16,
        body: &'static str,
    }

    #[async_trait]
    impl Fetcher for StaticFetcher {
        async fn fetch(&self, _url: &str) -> Result<FetchedPage> {
            Ok(FetchedPage {
                status: self.status,
                body: self.body.to_string(),
            })
        }
    }

    struct FailingFetcher;

    #[async_trait]
    impl Fetcher for FailingFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedPage> {
            Err(SiteFeedError::Fetch(format!("connection refused: {}", url)))
        }
    }

    fn renderer(fetcher: impl Fetcher + Send + Sync + 'static) -> PreviewRenderer {
        PreviewRenderer::new(Arc::new(fetcher))
    }

    #[tokio::test]
    async fn test_render_rewrites_and_injects_script() {
        let preview = renderer(StaticFetcher {
            status: 200,
            body: r#"<html><body><img src="/img.png"></body></html>"#,
        });
        let html = preview.render("https://example.com/page").await.unwrap();

        assert!(html.contains(r#"src="https://example.com/img.png""#));
        assert!(html.ends_with(PICKER_SCRIPT));
        assert!(html.contains("window.parent.postMessage"));
    }

    #[tokio::test]
    async fn test_non_success_status_still_renders() {
        let preview = renderer(StaticFetcher {
            status: 404,
            body: "<html><body><h1>Not found</h1></body></html>",
        });
        let html = preview.render("https://example.com/missing").await.unwrap();
        assert!(html.contains("<h1>Not found</h1>"));
    }

    #[tokio::test]
    async fn test_fetch_failure_is_reported() {
        let err = renderer(FailingFetcher)
            .render("https://example.com/")
            .await
            .unwrap_err();
        assert!(matches!(err, SiteFeedError::Fetch(ref m) if m.contains("connection refused")));
    }
}
