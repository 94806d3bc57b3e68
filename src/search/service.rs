// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search service orchestration
//!
//! Wraps a provider with rate limiting, ranking and graceful degradation:
//! every provider failure becomes an empty result list.

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::config::SearchConfig;
use super::provider::SearchProvider;
use super::rate_limiter::SearchRateLimiter;
use super::recency::Recency;
use super::types::{SearchError, SearchRequest, SearchResult};

/// Search stage of the pipeline
pub struct SearchService {
    provider: Arc<dyn SearchProvider>,
    rate_limiter: SearchRateLimiter,
}

impl SearchService {
    /// Create a new search service around a provider
    pub fn new(provider: Arc<dyn SearchProvider>, config: &SearchConfig) -> Self {
        debug!("Search provider enabled: {}", provider.name());
        Self {
            provider,
            rate_limiter: SearchRateLimiter::new(config.rate_limit_per_minute),
        }
    }

    /// Perform a search, never failing
    ///
    /// # Arguments
    /// * `term` - The refined search term
    /// * `limit` - Maximum number of results
    /// * `site_filter` - Optional site/domain restriction
    /// * `recency` - Optional date restriction, already validated
    ///
    /// # Returns
    /// Ranked results (rank = 1-based position), or an empty list on any failure
    pub async fn search(
        &self,
        term: &str,
        limit: usize,
        site_filter: Option<&str>,
        recency: Option<&Recency>,
    ) -> Vec<SearchResult> {
        let request = SearchRequest::new(term, limit)
            .with_site_filter(site_filter.map(str::to_string))
            .with_recency(recency.cloned());

        match self.try_search(&request).await {
            Ok(results) => results,
            Err(e) => {
                warn!(
                    "Web search via {} failed, continuing with no results: {}",
                    self.provider.name(),
                    e
                );
                Vec::new()
            }
        }
    }

    async fn try_search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>, SearchError> {
        if !self.provider.is_available() {
            return Err(SearchError::ProviderUnavailable {
                provider: self.provider.name().to_string(),
            });
        }

        self.rate_limiter.try_acquire()?;

        let start = Instant::now();
        let hits = self.provider.search(request).await?;

        let results: Vec<SearchResult> = hits
            .into_iter()
            .take(request.num_results)
            .enumerate()
            .map(|(index, hit)| SearchResult {
                rank: index + 1,
                url: hit.url,
                snippet: hit.snippet,
            })
            .collect();

        info!(
            "Search complete: {} results from {} in {}ms",
            results.len(),
            self.provider.name(),
            start.elapsed().as_millis()
        );

        Ok(results)
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }
}
