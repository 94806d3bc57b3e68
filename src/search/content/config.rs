//! Configuration for content fetching
//!
//! Defines settings for HTTP page fetching. The per-page character cap is
//! not here: it is a per-run pipeline setting passed to every fetch.

use std::env;

/// Configuration for content fetching
#[derive(Debug, Clone)]
pub struct ContentFetchConfig {
    /// Timeout per page fetch in seconds (default: 10)
    pub timeout_secs: u64,
    /// Maximum redirects followed per page (default: 5)
    pub max_redirects: usize,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Allow localhost/private network targets (default: false)
    pub allow_private_hosts: bool,
}

impl ContentFetchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            timeout_secs: env::var("CONTENT_FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            max_redirects: env::var("CONTENT_FETCH_MAX_REDIRECTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_redirects),
            user_agent: env::var("CONTENT_FETCH_USER_AGENT").unwrap_or(defaults.user_agent),
            allow_private_hosts: env::var("CONTENT_FETCH_ALLOW_PRIVATE_HOSTS")
                .map(|v| v.to_lowercase() == "true")
                .unwrap_or(false),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be at least 1".to_string());
        }
        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ContentFetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_redirects: 5,
            user_agent: format!("Mozilla/5.0 (compatible; byob-search/{})", crate::version::VERSION_NUMBER),
            allow_private_hosts: false,
        }
    }
}
