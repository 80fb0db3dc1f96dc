use html5ever::serialize::{serialize, SerializeOpts};
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};
use url::Url;

use crate::app::{Result, SiteFeedError};

/// Elements whose asset or link references are made absolute.
const REWRITTEN_TAGS: [&str; 3] = ["link", "script", "img"];
const REWRITTEN_ATTRS: [&str; 2] = ["src", "href"];

/// Parse `html`, make `src`/`href` on link, script and img elements absolute
/// against `base`, and serialize the document back to a string.
pub fn absolutize(html: &str, base: &Url) -> Result<String> {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);

    rewrite_node(&dom.document, base);

    let mut out = Vec::with_capacity(html.len());
    let document: SerializableHandle = dom.document.clone().into();
    serialize(&mut out, &document, SerializeOpts::default())
        .map_err(|e| SiteFeedError::Fetch(format!("Failed to serialize document: {}", e)))?;

    String::from_utf8(out).map_err(|e| SiteFeedError::Fetch(format!("Serialized document is not UTF-8: {}", e)))
}

fn rewrite_node(handle: &Handle, base: &Url) {
    if let NodeData::Element { name, attrs, .. } = &handle.data {
        if REWRITTEN_TAGS.contains(&&*name.local) {
            for attr in attrs.borrow_mut().iter_mut() {
                if !REWRITTEN_ATTRS.contains(&&*attr.name.local) || attr.value.is_empty() {
                    continue;
                }
                if let Ok(absolute) = base.join(&attr.value) {
                    attr.value = StrTendril::from(String::from(absolute));
                }
            }
        }
    }

    for child in handle.children.borrow().iter() {
        rewrite_node(child, base);
    }
}
