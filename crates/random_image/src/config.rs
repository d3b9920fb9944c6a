//! Transport configuration shared by adapters and the downloader.

use serde::{Deserialize, Serialize};

/// Default number of redirects followed when streaming an image.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// HTTP settings. The core never reads these from the environment; callers build them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `User-Agent` sent with every request.
    pub user_agent: String,

    /// Whole-request timeout. `None` keeps the HTTP client's own defaults.
    pub timeout_secs: Option<u64>,

    /// Redirects followed before a download fails.
    pub max_redirects: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: concat!("random-image/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: None,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl Config {
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    #[must_use]
    pub fn with_max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.user_agent.starts_with("random-image/"));
        assert_eq!(config.timeout_secs, None);
        assert_eq!(config.max_redirects, DEFAULT_MAX_REDIRECTS);
    }

    #[test]
    fn test_partial_deserialize_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"timeout_secs": 30}"#).unwrap();
        assert_eq!(config.timeout_secs, Some(30));
        assert_eq!(config.max_redirects, DEFAULT_MAX_REDIRECTS);
    }
}
