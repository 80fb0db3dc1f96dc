use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::browser::BrowserContextId;
use chromiumoxide::cdp::browser_protocol::page::{EventDomContentEventFired, NavigateParams};
use chromiumoxide::cdp::browser_protocol::target::{CreateBrowserContextParams, CreateTargetParams};
use chromiumoxide::Page;
use futures::future::LocalBoxFuture;
use futures::{FutureExt, StreamExt};
use tokio::task::JoinHandle;

use crate::app::{Result, SiteFeedError};
use crate::scraper::ScraperConfig;

static LAUNCHED: AtomicBool = AtomicBool::new(false);

/// The process-wide Chrome instance.
///
/// Only one session can ever be launched per process; later attempts fail.
/// All methods must run on the runtime that launched the browser, since the
/// CDP handler task lives there.
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    user_agent: String,
}

/// A page living in its own browser context (separate cookies and storage).
pub struct IsolatedPage {
    context_id: BrowserContextId,
    page: Page,
}

impl IsolatedPage {
    pub fn page(&self) -> &Page {
        &self.page
    }
}

impl BrowserSession {
    /// Launch Chrome with the given configuration.
    pub async fn launch(config: &ScraperConfig) -> Result<Self> {
        claim_launch()?;

        let mut builder = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-software-rasterizer");

        if !config.headless {
            builder = builder.with_head();
        }

        let browser_config = builder
            .build()
            .map_err(|e| SiteFeedError::Browser(format!("Failed to build browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
            SiteFeedError::Browser(format!(
                "Failed to launch browser: {}. Is Chrome or Chromium installed and in PATH?",
                e
            ))
        })?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("Browser handler error: {}", e);
                }
            }
            tracing::warn!("Browser handler loop ended");
        });

        tracing::info!("Browser session launched (headless: {})", config.headless);

        Ok(Self {
            browser,
            handler,
            user_agent: config.user_agent.clone(),
        })
    }

    /// Create a fresh browser context holding a single blank page.
    pub async fn open_context(&mut self) -> Result<IsolatedPage> {
        let context_id = self
            .browser
            .create_browser_context(CreateBrowserContextParams::default())
            .await
            .map_err(|e| SiteFeedError::Browser(format!("Failed to create browser context: {}", e)))?;

        let page = match self.new_page_in(&context_id).await {
            Ok(page) => page,
            Err(e) => {
                self.dispose_context(context_id).await;
                return Err(e);
            }
        };

        let isolated = IsolatedPage { context_id, page };

        if let Err(e) = isolated.page.set_user_agent(&self.user_agent).await {
            self.close_context(isolated).await;
            return Err(SiteFeedError::Browser(format!("Failed to set user agent: {}", e)));
        }

        Ok(isolated)
    }

    /// Close the page and dispose its browser context. Failures are only logged.
    pub async fn close_context(&self, isolated: IsolatedPage) {
        let IsolatedPage { context_id, page } = isolated;

        if let Err(e) = page.close().await {
            tracing::debug!("Failed to close page: {}", e);
        }
        self.dispose_context(context_id).await;
    }

    /// Run `work` against a page in a fresh context, closing the context on every path.
    pub async fn with_isolated_page<T, F>(&mut self, work: F) -> Result<T>
    where
        F: for<'p> FnOnce(&'p Page) -> LocalBoxFuture<'p, Result<T>>,
    {
        with_isolated(self, work).await
    }

    /// Load `url` in an isolated page and return the rendered DOM as HTML.
    ///
    /// Waits for DOMContentLoaded only, scrolls once to trigger lazy
    /// content, then waits the fixed settle delay.
    pub async fn render(&mut self, url: &str, config: &ScraperConfig) -> Result<String> {
        let url = url.to_string();
        let timeout = config.navigation_timeout();
        let scroll = config.scroll_script();
        let settle = config.settle_delay();

        self.with_isolated_page(move |page| {
            async move {
                tokio::time::timeout(timeout, navigate(page, &url))
                    .await
                    .map_err(|_| {
                        SiteFeedError::Navigation(format!(
                            "Timed out after {}s loading {}",
                            timeout.as_secs(),
                            url
                        ))
                    })??;

                page.evaluate(scroll.as_str())
                    .await
                    .map_err(|e| SiteFeedError::Browser(format!("Scroll script failed: {}", e)))?;
                tokio::time::sleep(settle).await;

                page.content()
                    .await
                    .map_err(|e| SiteFeedError::Browser(format!("Failed to read page content: {}", e)))
            }
            .boxed_local()
        })
        .await
    }

    async fn new_page_in(&self, context_id: &BrowserContextId) -> Result<Page> {
        let params = CreateTargetParams::builder()
            .url("about:blank")
            .browser_context_id(context_id.clone())
            .build()
            .map_err(SiteFeedError::Browser)?;

        self.browser
            .new_page(params)
            .await
            .map_err(|e| SiteFeedError::Browser(format!("Failed to create page: {}", e)))
    }

    async fn dispose_context(&self, context_id: BrowserContextId) {
        if let Err(e) = self.browser.dispose_browser_context(context_id).await {
            tracing::warn!("Failed to dispose browser context: {}", e);
        }
    }
}

#[async_trait(?Send)]
impl IsolatedContexts for BrowserSession {
    type Context = IsolatedPage;
    type Page = Page;

    async fn open(&mut self) -> Result<IsolatedPage> {
        self.open_context().await
    }

    fn page(context: &IsolatedPage) -> &Page {
        context.page()
    }

    async fn close(&self, context: IsolatedPage) {
        self.close_context(context).await
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

fn claim_launch() -> Result<()> {
    if LAUNCHED.swap(true, Ordering::SeqCst) {
        return Err(SiteFeedError::Browser(
            "Browser session already launched in this process".to_string(),
        ));
    }
    Ok(())
}

/// Something that hands out pages in disposable, isolated contexts.
#[async_trait(?Send)]
pub(crate) trait IsolatedContexts {
    type Context;
    type Page;

    async fn open(&mut self) -> Result<Self::Context>;

    fn page(context: &Self::Context) -> &Self::Page;

    /// Release `context`. Must not fail.
    async fn close(&self, context: Self::Context);
}

/// Open a context, run `work` on its page and close the context again,
/// also when `work` fails or panics. Panics resume after the close.
pub(crate) async fn with_isolated<C, T, F>(contexts: &mut C, work: F) -> Result<T>
where
    C: IsolatedContexts,
    F: for<'p> FnOnce(&'p C::Page) -> LocalBoxFuture<'p, Result<T>>,
{
    let context = contexts.open().await?;
    let outcome = AssertUnwindSafe(work(C::page(&context))).catch_unwind().await;
    contexts.close(context).await;

    match outcome {
        Ok(result) => result,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

/// Navigate and resolve once the DOM has been parsed.
async fn navigate(page: &Page, url: &str) -> Result<()> {
    let mut dom_ready = page
        .event_listener::<EventDomContentEventFired>()
        .await
        .map_err(|e| SiteFeedError::Navigation(format!("Failed to subscribe to page events: {}", e)))?;

    let response = page
        .execute(NavigateParams::new(url))
        .await
        .map_err(|e| SiteFeedError::Navigation(format!("{}: {}", url, e)))?;

    if let Some(error_text) = &response.result.error_text {
        return Err(SiteFeedError::Navigation(format!("{}: {}", url, error_text)));
    }

    match dom_ready.next().await {
        Some(_) => Ok(()),
        None => Err(SiteFeedError::Navigation(format!(
            "{}: page closed before DOMContentLoaded",
            url
        ))),
    }
}
