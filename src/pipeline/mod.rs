// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search-augmented answer pipeline
//!
//! ```text
//! query → refine → search → [fetch → summarize] × N → synthesize → PipelineOutput
//! ```
//!
//! Only refinement failures and invalid input abort a run. Everything after
//! refinement degrades: an empty search, a dropped page, a missing summary
//! or a missing narrative.

pub mod batch;
pub mod config;
pub mod errors;
pub mod orchestrator;
pub mod refiner;
pub mod summarizer;
pub mod synthesizer;
pub mod types;

pub use batch::{BatchLimits, BatchStage};
pub use config::{PipelineConfig, PipelineOverrides, Setting};
pub use errors::PipelineError;
pub use orchestrator::{Pipeline, RunRequest};
pub use refiner::{QueryRefiner, REFINE_INSTRUCTION};
pub use summarizer::Summarizer;
pub use synthesizer::Synthesizer;
pub use types::{PipelineOutput, ProcessedResult, RefinedQuery};
