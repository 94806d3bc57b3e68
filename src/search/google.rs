// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Google Custom Search JSON API provider
//!
//! Sends `key`, `cx`, `q` and `num`, plus `siteSearch` and `dateRestrict`
//! when a site filter or recency filter is set.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::config::SearchConfig;
use super::provider::SearchProvider;
use super::types::{SearchError, SearchHit, SearchRequest};

/// Largest `num` the Custom Search API accepts
pub const GOOGLE_MAX_RESULTS: usize = 10;

/// Google Custom Search provider
pub struct GoogleSearchProvider {
    api_key: String,
    engine_id: String,
    endpoint: String,
    timeout_ms: u64,
    client: Client,
}

impl GoogleSearchProvider {
    /// Create a new Google Custom Search provider
    ///
    /// # Arguments
    /// * `api_key` - Google API key
    /// * `engine_id` - Programmable Search Engine ID (`cx`)
    /// * `config` - Endpoint and timeout settings
    pub fn new(
        api_key: impl Into<String>,
        engine_id: impl Into<String>,
        config: &SearchConfig,
    ) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| SearchError::ProviderUnavailable {
                provider: format!("google ({})", e),
            })?;

        Ok(Self {
            api_key: api_key.into(),
            engine_id: engine_id.into(),
            endpoint: config.endpoint.clone(),
            timeout_ms: config.request_timeout_ms,
            client,
        })
    }

    /// Build the query string for a request
    fn query_params(&self, request: &SearchRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("key", self.api_key.clone()),
            ("cx", self.engine_id.clone()),
            ("q", request.query.clone()),
            (
                "num",
                request.num_results.clamp(1, GOOGLE_MAX_RESULTS).to_string(),
            ),
        ];

        if let Some(ref site) = request.site_filter {
            params.push(("siteSearch", site.clone()));
        }
        if let Some(ref recency) = request.recency {
            params.push(("dateRestrict", recency.as_str().to_string()));
        }

        params
    }
}

#[async_trait]
impl SearchProvider for GoogleSearchProvider {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>, SearchError> {
        debug!("Google search: q='{}' num={}", request.query, request.num_results);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&self.query_params(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout {
                        timeout_ms: self.timeout_ms,
                    }
                } else {
                    SearchError::ApiError {
                        status: 0,
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();

        if status == 429 {
            return Err(SearchError::RateLimited {
                retry_after_secs: 60,
            });
        }

        if status == 401 || status == 403 {
            return Err(SearchError::NoApiKey {
                provider: "google".to_string(),
            });
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SearchError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let data: GoogleResponse = response.json().await.map_err(|e| SearchError::ApiError {
            status: 0,
            message: format!("JSON parse error: {}", e),
        })?;

        Ok(data
            .items
            .into_iter()
            .map(|item| SearchHit {
                url: item.link,
                snippet: item.snippet,
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "google"
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty() && !self.engine_id.is_empty()
    }
}

#[derive(Debug, serde::Deserialize)]
struct GoogleResponse {
    #[serde(default)]
    items: Vec<GoogleItem>,
}

#[derive(Debug, serde::Deserialize)]
struct GoogleItem {
    link: String,
    #[serde(default)]
    snippet: String,
}
