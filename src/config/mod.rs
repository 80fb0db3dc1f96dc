//! Configuration management for sitefeed.
//!
//! Configuration is read once at startup from `--config <path>` or, when
//! present, `~/.config/sitefeed/config.toml`. Missing files and missing
//! fields fall back to defaults. Nothing here can be changed per request.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cache::CacheConfig;
use crate::preview::PreviewConfig;
use crate::scraper::ScraperConfig;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub scraper: ScraperConfig,
    pub preview: PreviewConfig,
    pub cache: CacheConfig,
}

/// Listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    /// Load configuration from `path`, or from the default path if it exists.
    ///
    /// An explicitly given path must exist. The default path is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => match Self::default_config_path() {
                Ok(default_path) if default_path.exists() => Self::load_from(&default_path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Load and parse a specific config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/sitefeed/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("sitefeed").join("config.toml"))
    }

    /// Annotated example configuration matching the defaults.
    pub fn default_config_content() -> &'static str {
        r##"# sitefeed configuration

[server]
host = "0.0.0.0"
port = 5000

[scraper]
# Run browser in headless mode (no visible window)
headless = true

# Budget for loading a page up to DOMContentLoaded, in seconds
navigation_timeout_secs = 30

# Wait after the lazy-load scroll (milliseconds)
settle_ms = 1000

# Vertical scroll offset used to trigger lazy-loaded content
scroll_offset = 1200

# Maximum number of feed entries (never more than 20)
max_items = 20

user_agent = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)"

[preview]
# Timeout for the plain HTTP fetch used by /preview, in seconds
timeout_secs = 15
user_agent = "Mozilla/5.0"

[cache]
# How long a generated feed is served from memory, in seconds
ttl_secs = 300
"##
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn test_default_config_deserializes() {
        let config: Config =
            toml::from_str(Config::default_config_content()).expect("Default config should be valid TOML");

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.scraper.navigation_timeout(), Duration::from_secs(30));
        assert_eq!(config.scraper.settle_delay(), Duration::from_millis(1000));
        assert_eq!(config.preview.timeout(), Duration::from_secs(15));
        assert_eq!(config.cache.ttl(), Duration::from_secs(300));
    }

    #[test]
    fn test_default_content_matches_defaults() {
        let parsed: Config = toml::from_str(Config::default_config_content()).unwrap();
        let defaults = Config::default();

        assert_eq!(parsed.server.host, defaults.server.host);
        assert_eq!(parsed.scraper.user_agent, defaults.scraper.user_agent);
        assert_eq!(parsed.scraper.scroll_offset, defaults.scraper.scroll_offset);
        assert_eq!(parsed.preview.user_agent, defaults.preview.user_agent);
        assert_eq!(parsed.cache.ttl_secs, defaults.cache.ttl_secs);
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[server]
port = 8080

[cache]
ttl_secs = 60
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.cache.ttl_secs, 60);
        assert!(config.scraper.headless);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.server.listen_addr(), "0.0.0.0:5000");
        assert_eq!(config.scraper.max_items, 20);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scraper]\nheadless = false\nsettle_ms = 250").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert!(!config.scraper.headless);
        assert_eq!(config.scraper.settle_ms, 250);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
