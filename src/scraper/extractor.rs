use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::app::{Result, SiteFeedError};
use crate::domain::FeedEntry;

const LINK_SELECTOR: &str = "a[href]";

/// Turns repeating list items of a rendered page into feed entries
pub struct ItemExtractor {
    item: Selector,
    title: Selector,
    link: Selector,
    limit: usize,
}

impl ItemExtractor {
    /// Compile the item and title selectors.
    ///
    /// Fails with [`SiteFeedError::Selection`] if either selector is not valid CSS.
    pub fn new(item_selector: &str, title_selector: &str, limit: usize) -> Result<Self> {
        Ok(Self {
            item: parse_selector(item_selector)?,
            title: parse_selector(title_selector)?,
            link: parse_selector(LINK_SELECTOR)?,
            limit,
        })
    }

    /// Extract entries from `html`, resolving links against `page_url`.
    ///
    /// Only the first `limit` matches of the item selector are considered.
    /// Items without a title match or a usable link are skipped.
    pub fn extract(&self, html: &str, page_url: &Url, emitted_at: DateTime<Utc>) -> Vec<FeedEntry> {
        let document = Html::parse_document(html);

        document
            .select(&self.item)
            .take(self.limit)
            .filter_map(|item| self.entry_for(item, page_url, emitted_at))
            .collect()
    }

    fn entry_for(&self, item: ElementRef<'_>, page_url: &Url, emitted_at: DateTime<Utc>) -> Option<FeedEntry> {
        let title = item.select(&self.title).next()?;
        let href = item
            .select(&self.link)
            .filter_map(|a| a.value().attr("href"))
            .find(|href| !href.is_empty())?;

        let link = match page_url.join(href) {
            Ok(link) => link,
            Err(e) => {
                tracing::debug!("Skipping item with unresolvable href {:?}: {}", href, e);
                return None;
            }
        };

        let text = title.text().collect::<String>();
        Some(FeedEntry::new(text.trim(), link.as_str(), emitted_at))
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| SiteFeedError::Selection(format!("{:?}: {}", selector, e)))
}
