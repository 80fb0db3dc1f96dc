use serde::{Deserialize, Serialize};

const KEY_DELIMITER: char = '|';

/// Parameters of a single feed generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedRequest {
    pub url: String,
    pub item_selector: String,
    pub title_selector: String,
}

impl FeedRequest {
    pub fn new(
        url: impl Into<String>,
        item_selector: impl Into<String>,
        title_selector: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            item_selector: item_selector.into(),
            title_selector: title_selector.into(),
        }
    }

    /// Fingerprint identifying equivalent requests.
    ///
    /// Fields are joined verbatim, so selectors that contain the delimiter
    /// can collide with other requests.
    pub fn cache_key(&self) -> String {
        format!(
            "{}{KEY_DELIMITER}{}{KEY_DELIMITER}{}",
            self.url, self.item_selector, self.title_selector
        )
    }
}
