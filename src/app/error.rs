use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteFeedError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Invalid selector: {0}")]
    Selection(String),

    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Feed serialization error: {0}")]
    Feed(#[from] rss::Error),

    #[error("Browser worker error: {0}")]
    Coordinator(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SiteFeedError>;
