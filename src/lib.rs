// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod config;
pub mod llm;
pub mod pipeline;
pub mod search;
pub mod version;

// Re-export the pipeline entry points
pub use config::{ConfigurationError, Credentials, ServerConfig};
pub use pipeline::{
    Pipeline, PipelineConfig, PipelineError, PipelineOutput, PipelineOverrides, ProcessedResult,
    RefinedQuery, RunRequest,
};
