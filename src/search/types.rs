// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for web search functionality

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::recency::Recency;

/// A single hit as returned by a search provider, before ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// URL of the hit
    pub url: String,
    /// Snippet/description of the hit
    pub snippet: String,
}

/// A ranked search result
///
/// `rank` is the 1-based position in the provider response and never
/// changes after the search stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// 1-based position in the provider response
    pub rank: usize,
    /// URL of the search result
    pub url: String,
    /// Snippet/description of the search result
    pub snippet: String,
}

/// Parameters for a single provider call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// The search term
    pub query: String,
    /// Maximum number of results to return
    pub num_results: usize,
    /// Restrict results to one site/domain
    pub site_filter: Option<String>,
    /// Date restriction forwarded to the index
    pub recency: Option<Recency>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, num_results: usize) -> Self {
        Self {
            query: query.into(),
            num_results,
            site_filter: None,
            recency: None,
        }
    }

    pub fn with_site_filter(mut self, site_filter: Option<String>) -> Self {
        self.site_filter = site_filter;
        self
    }

    pub fn with_recency(mut self, recency: Option<Recency>) -> Self {
        self.recency = recency;
        self
    }
}

/// Errors that can occur during search operations
#[derive(Debug, Error)]
pub enum SearchError {
    /// Rate limited locally or by the search provider
    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after_secs: u64,
    },

    /// API error from the search provider
    #[error("Search API error: {status} - {message}")]
    ApiError {
        /// HTTP status code (0 for transport failures)
        status: u16,
        /// Error message
        message: String,
    },

    /// Search request timed out
    #[error("Search timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout duration in milliseconds
        timeout_ms: u64,
    },

    /// Search provider is unavailable
    #[error("Provider unavailable: {provider}")]
    ProviderUnavailable {
        /// Name of the unavailable provider
        provider: String,
    },

    /// Provider rejected the configured credentials
    #[error("No valid API key configured for {provider}")]
    NoApiKey {
        /// Name of the provider missing API key
        provider: String,
    },

    /// Recency filter is not of the form `[d|w|m|y][age]`
    #[error("Invalid recency filter '{value}': expected [d|w|m|y][age], e.g. w1 or m3")]
    InvalidRecency {
        /// The rejected value
        value: String,
    },
}
