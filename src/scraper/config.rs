use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::MAX_ENTRIES;

pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

/// Configuration for the browser-backed scraper
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Whether to run the browser in headless mode (default: true)
    pub headless: bool,

    /// Budget for navigation up to DOMContentLoaded, in seconds (default: 30)
    pub navigation_timeout_secs: u64,

    /// Wait after the lazy-load scroll in milliseconds (default: 1000)
    pub settle_ms: u64,

    /// Vertical offset scrolled to once the DOM is ready (default: 1200)
    pub scroll_offset: u32,

    /// Maximum number of list items turned into feed entries (default: 20)
    pub max_items: usize,

    /// User agent applied to every isolated browser context
    pub user_agent: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            headless: true,
            navigation_timeout_secs: 30,
            settle_ms: 1000,
            scroll_offset: 1200,
            max_items: MAX_ENTRIES,
            user_agent: DESKTOP_USER_AGENT.to_string(),
        }
    }
}

impl ScraperConfig {
    /// Get the navigation timeout as a Duration
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    /// Get the settle delay as a Duration
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Item limit, never above [`MAX_ENTRIES`]
    pub fn item_limit(&self) -> usize {
        self.max_items.min(MAX_ENTRIES)
    }

    /// Script run once after DOMContentLoaded to trigger lazy content
    pub fn scroll_script(&self) -> String {
        format!("window.scrollTo(0, {})", self.scroll_offset)
    }
}
