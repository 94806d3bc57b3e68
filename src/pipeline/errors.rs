// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Errors that abort a pipeline run
//!
//! Only these reach the caller. Search, fetch, summarization and synthesis
//! failures degrade inside the pipeline and never show up here.

use thiserror::Error;

use crate::config::ConfigurationError;
use crate::llm::ModelError;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Pipeline could not be constructed (missing credentials, bad settings)
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The query could not be refined into a search term
    #[error("Query refinement failed: {0}")]
    Refinement(#[source] ModelError),

    /// Query is blank
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Recency filter is malformed
    #[error("Invalid recency filter: {0}")]
    InvalidRecency(String),

    /// Per-run configuration is unusable
    #[error("Invalid pipeline configuration: {0}")]
    InvalidConfig(String),

    /// Run was cancelled through its cancellation token
    #[error("Pipeline run cancelled")]
    Cancelled,
}

impl PipelineError {
    /// True when the caller's input caused the failure (HTTP 400)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PipelineError::InvalidQuery(_)
                | PipelineError::InvalidRecency(_)
                | PipelineError::InvalidConfig(_)
        )
    }
}
