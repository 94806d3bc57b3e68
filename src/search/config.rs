// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for web search functionality

use std::env;

/// Default Google Custom Search JSON API endpoint
pub const DEFAULT_GOOGLE_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Configuration for web search functionality
///
/// Credentials are not part of this struct; they live in
/// [`crate::config::Credentials`].
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Search API endpoint
    pub endpoint: String,
    /// Rate limit (requests per minute)
    pub rate_limit_per_minute: u32,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl SearchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            endpoint: env::var("GOOGLE_SEARCH_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.endpoint),
            rate_limit_per_minute: env::var("SEARCH_RATE_LIMIT_PER_MINUTE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.rate_limit_per_minute),
            request_timeout_ms: env::var("SEARCH_REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_ms),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if url::Url::parse(&self.endpoint).is_err() {
            return Err(format!("Invalid search endpoint: {}", self.endpoint));
        }
        if self.rate_limit_per_minute == 0 {
            return Err("Rate limit must be greater than 0".to_string());
        }
        if self.request_timeout_ms == 0 {
            return Err("Request timeout must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GOOGLE_SEARCH_URL.to_string(),
            rate_limit_per_minute: 60,
            request_timeout_ms: 10000,
        }
    }
}
