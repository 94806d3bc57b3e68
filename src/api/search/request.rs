// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search API request types

use serde::{Deserialize, Serialize};

use crate::pipeline::RunRequest;

/// Shortest query accepted, in characters of the raw string
pub const MIN_QUERY_CHARS: usize = 2;

/// Request body for POST /api/search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchApiRequest {
    /// Search query string (required, at least 2 chars)
    #[serde(default)]
    pub query: Option<String>,

    /// Restrict results to one site/domain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_filter: Option<String>,

    /// Recency filter such as `w1` or `m3`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recency: Option<String>,
}

impl SearchApiRequest {
    /// Validate the request and turn it into a pipeline run
    pub fn into_run_request(self) -> Result<RunRequest, String> {
        let query = self.query.ok_or_else(|| "Missing search query".to_string())?;
        // Blank queries that pass this check are rejected by the pipeline
        if query.chars().count() < MIN_QUERY_CHARS {
            return Err("Invalid search query".to_string());
        }

        let mut run = RunRequest::new(query);
        run.site_filter = self.site_filter;
        run.recency = self.recency;
        Ok(run)
    }
}
