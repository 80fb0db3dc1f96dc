pub mod feed;
pub mod request;

pub use feed::{FeedEntry, FeedMeta, MAX_ENTRIES};
pub use request::FeedRequest;
