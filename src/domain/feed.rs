use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of entries a generated feed may carry.
pub const MAX_ENTRIES: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    pub description: String,
    pub published_at: DateTime<Utc>,
}

impl FeedEntry {
    /// Build an entry whose description mirrors its title.
    pub fn new(title: impl Into<String>, link: impl Into<String>, published_at: DateTime<Utc>) -> Self {
        let title = title.into();
        Self {
            description: title.clone(),
            title,
            link: link.into(),
            published_at,
        }
    }

    /// Permalink GUID, identical to the resolved link.
    pub fn guid(&self) -> &str {
        &self.link
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedMeta {
    pub title: String,
    pub link: String,
    pub description: String,
    pub language: String,
    pub last_build_date: DateTime<Utc>,
}

impl FeedMeta {
    /// Channel metadata describing a feed synthesized from `source_url`.
    pub fn for_source(source_url: &str, built_at: DateTime<Utc>) -> Self {
        Self {
            title: format!("Custom RSS Feed: {}", source_url),
            link: source_url.to_string(),
            description: format!("Generated RSS feed from {}", source_url),
            language: "en".to_string(),
            last_build_date: built_at,
        }
    }
}
