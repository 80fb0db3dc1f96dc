//! RSS 2.0 document assembly and serialization.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use rss::{Channel, Guid, Item};

use crate::app::Result;
use crate::domain::{FeedEntry, FeedMeta, MAX_ENTRIES};

const INDENT_SIZE: usize = 2;

/// A feed ready to be serialized. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct FeedDocument {
    meta: FeedMeta,
    entries: Vec<FeedEntry>,
}

impl FeedDocument {
    /// Build a document, keeping at most [`MAX_ENTRIES`] entries.
    pub fn new(meta: FeedMeta, mut entries: Vec<FeedEntry>) -> Self {
        entries.truncate(MAX_ENTRIES);
        Self { meta, entries }
    }

    /// Build a document describing a page scraped from `source_url`.
    pub fn for_source(source_url: &str, entries: Vec<FeedEntry>, built_at: DateTime<Utc>) -> Self {
        Self::new(FeedMeta::for_source(source_url, built_at), entries)
    }

    pub fn entries(&self) -> &[FeedEntry] {
        &self.entries
    }

    /// Serialize as pretty-printed RSS 2.0.
    pub fn to_xml(&self) -> Result<Bytes> {
        let channel = self.to_channel();
        let mut out = Vec::new();
        channel.pretty_write_to(&mut out, b' ', INDENT_SIZE)?;
        Ok(Bytes::from(out))
    }

    fn to_channel(&self) -> Channel {
        Channel {
            title: self.meta.title.clone(),
            link: self.meta.link.clone(),
            description: self.meta.description.clone(),
            language: Some(self.meta.language.clone()),
            last_build_date: Some(self.meta.last_build_date.to_rfc2822()),
            items: self.entries.iter().map(to_item).collect(),
            ..Default::default()
        }
    }
}

fn to_item(entry: &FeedEntry) -> Item {
    Item {
        title: Some(entry.title.clone()),
        link: Some(entry.link.clone()),
        description: Some(entry.description.clone()),
        guid: Some(Guid {
            value: entry.guid().to_string(),
            permalink: true,
        }),
        pub_date: Some(entry.published_at.to_rfc2822()),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(n: usize) -> Vec<FeedEntry> {
        let now = Utc::now();
        (0..n)
            .map(|i| FeedEntry::new(format!("Story {i}"), format!("https://example.com/s/{i}"), now))
            .collect()
    }

    fn parse(xml: &[u8]) -> feed_rs::model::Feed {
        feed_rs::parser::parse(xml).expect("generated feed should parse")
    }

    #[test]
    fn test_channel_metadata() {
        let doc = FeedDocument::for_source("https://example.com/news", entries(0), Utc::now());
        let xml = doc.to_xml().unwrap();
        let text = std::str::from_utf8(&xml).unwrap();

        assert!(text.contains("<title>Custom RSS Feed: https://example.com/news</title>"));
        assert!(text.contains("<description>Generated RSS feed from https://example.com/news</description>"));
        assert!(text.contains("<language>en</language>"));
        assert!(text.contains("<lastBuildDate>"));
    }

    #[test]
    fn test_empty_feed_is_valid() {
        let doc = FeedDocument::for_source("https://example.com", Vec::new(), Utc::now());
        let feed = parse(&doc.to_xml().unwrap());
        assert!(feed.entries.is_empty());
        assert_eq!(feed.title.map(|t| t.content), Some("Custom RSS Feed: https://example.com".into()));
    }

    #[test]
    fn test_round_trip_preserves_items() {
        let doc = FeedDocument::for_source("https://example.com", entries(7), Utc::now());
        let feed = parse(&doc.to_xml().unwrap());

        assert_eq!(feed.entries.len(), 7);
        for (i, entry) in feed.entries.iter().enumerate() {
            assert_eq!(entry.title.as_ref().map(|t| t.content.as_str()), Some(format!("Story {i}").as_str()));
            assert_eq!(entry.links.first().map(|l| l.href.as_str()), Some(format!("https://example.com/s/{i}").as_str()));
            assert_eq!(entry.id, format!("https://example.com/s/{i}"));
            assert!(entry.published.is_some());
        }
    }

    #[test]
    fn test_entries_are_capped() {
        let doc = FeedDocument::for_source("https://example.com", entries(35), Utc::now());
        assert_eq!(doc.entries().len(), MAX_ENTRIES);
        assert_eq!(parse(&doc.to_xml().unwrap()).entries.len(), MAX_ENTRIES);
    }

    #[test]
    fn test_guid_is_permalink() {
        let doc = FeedDocument::for_source("https://example.com", entries(1), Utc::now());
        let xml = doc.to_xml().unwrap();
        let text = std::str::from_utf8(&xml).unwrap();
        assert!(text.contains("https://example.com/s/0</guid>"));
        assert!(!text.contains(r#"isPermaLink="false""#));
    }

    #[test]
    fn test_special_characters_are_escaped() {
        let now = Utc::now();
        let doc = FeedDocument::for_source(
            "https://example.com/?a=1&b=2",
            vec![FeedEntry::new("Tom & Jerry <live>", "https://example.com/x?y=1&z=2", now)],
            now,
        );
        let feed = parse(&doc.to_xml().unwrap());
        assert_eq!(feed.entries[0].title.as_ref().unwrap().content, "Tom & Jerry <live>");
    }
}
