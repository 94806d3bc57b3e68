// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Web search module
//!
//! Provides the retrieval half of the pipeline:
//! - Google Custom Search provider behind the `SearchProvider` trait
//! - Recency (date restriction) validation
//! - Rate limiting of outgoing search calls
//! - Graceful degradation: provider failures yield no results, never errors
//! - Page content fetching and HTML-to-text extraction (`content`)

pub mod config;
pub mod content;
pub mod google;
pub mod provider;
pub mod rate_limiter;
pub mod recency;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use config::SearchConfig;
pub use google::GoogleSearchProvider;
pub use provider::SearchProvider;
pub use recency::{Recency, RecencyPeriod};
pub use service::SearchService;
pub use types::{SearchError, SearchHit, SearchRequest, SearchResult};

pub use content::{
    ContentFetchConfig, ContentFetcher, FetchError, HttpContentFetcher, RetrievedContent,
};
