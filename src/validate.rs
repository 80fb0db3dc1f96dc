//! Target URL validation shared by the feed and preview endpoints.
//!
//! This is a loopback-literal check only. It does not resolve hostnames
//! and does not protect against private networks or DNS rebinding.

use url::Url;

use crate::app::{Result, SiteFeedError};

const ALLOWED_SCHEMES: [&str; 2] = ["http", "https"];
const BLOCKED_HOSTS: [&str; 2] = ["localhost", "127.0.0.1"];

/// Returns true if `url` may be fetched on behalf of a client.
pub fn validate(url: &str) -> bool {
    check(url).is_ok()
}

/// Parse and validate `url`, returning the parsed form or the reason it was rejected.
pub fn check(url: &str) -> Result<Url> {
    let parsed = Url::parse(url)
        .map_err(|e| SiteFeedError::Validation(format!("malformed URL {url:?}: {e}")))?;

    if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
        return Err(SiteFeedError::Validation(format!(
            "unsupported scheme {:?}",
            parsed.scheme()
        )));
    }

    if let Some(host) = parsed.host_str() {
        if BLOCKED_HOSTS.contains(&host) {
            return Err(SiteFeedError::Validation(format!("blocked host {host:?}")));
        }
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(validate("http://example.com/list"));
        assert!(validate("https://example.com/list?page=2"));
        assert!(validate("https://news.example.org:8443/"));
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert!(!validate("ftp://example.com/file"));
        assert!(!validate("file:///etc/passwd"));
        assert!(!validate("javascript:alert(1)"));
        assert!(!validate("data:text/html,hello"));
    }

    #[test]
    fn test_rejects_loopback_literals_on_any_port() {
        assert!(!validate("http://localhost/"));
        assert!(!validate("https://localhost:8080/admin"));
        assert!(!validate("http://127.0.0.1:5000/feed"));
        assert!(!validate("https://127.0.0.1/"));
    }

    #[test]
    fn test_host_comparison_follows_parser_normalisation() {
        // The URL parser lowercases hostnames before the check runs.
        assert!(!validate("http://LOCALHOST/"));
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(!validate(""));
        assert!(!validate("not a url"));
        assert!(!validate("example.com/no-scheme"));
    }

    #[test]
    fn test_check_reports_reason() {
        let err = check("ftp://example.com").unwrap_err();
        assert!(matches!(err, SiteFeedError::Validation(ref msg) if msg.contains("ftp")));

        let url = check("https://example.com/a/b").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
    }
}
