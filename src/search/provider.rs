// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search provider trait definition

use async_trait::async_trait;

use super::types::{SearchError, SearchHit, SearchRequest};

/// Trait for implementing search providers
///
/// Providers report every failure as a `SearchError`; turning failures into
/// an empty result list is the job of [`super::SearchService`].
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Perform a web search
    ///
    /// # Arguments
    /// * `request` - Search term, result count and optional filters
    ///
    /// # Returns
    /// Hits in the provider's relevance order, or an error
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>, SearchError>;

    /// Get the provider name for logging
    fn name(&self) -> &'static str;

    /// Check if the provider is available (has API key, etc.)
    fn is_available(&self) -> bool;
}
