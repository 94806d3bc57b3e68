// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Pipeline data model and its wire format

use serde::{Deserialize, Serialize};
use std::fmt;

/// Short search phrase derived from the user's query
///
/// Never empty: construction fails on blank text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RefinedQuery(String);

impl RefinedQuery {
    /// Trim `text`; `None` if nothing is left
    pub fn new(text: impl AsRef<str>) -> Option<Self> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RefinedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One search result enriched with the summary of its page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedResult {
    /// Rank carried over from the search result, never renumbered
    #[serde(rename = "result_rank")]
    pub rank: usize,
    #[serde(rename = "webpage_url")]
    pub url: String,
    /// The search snippet
    #[serde(rename = "result_title")]
    pub title: String,
    /// `None` when summarization failed
    #[serde(rename = "webpage_summary")]
    pub summary: Option<String>,
}

/// Terminal artifact of one pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOutput {
    #[serde(rename = "refined_search_term")]
    pub refined_query: RefinedQuery,
    /// `None` only when synthesis failed
    #[serde(rename = "comprehensive_rag_response")]
    pub narrative: Option<String>,
    #[serde(rename = "processed_search_results")]
    pub processed_results: Vec<ProcessedResult>,
}
