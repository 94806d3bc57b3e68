// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Language-model boundary
//!
//! The pipeline talks to models only through [`LanguageModel`], so tests can
//! inject stubs and deployments can point at any OpenAI-compatible endpoint.

pub mod model;
pub mod openai;
pub mod types;

pub use model::LanguageModel;
pub use openai::{LlmConfig, OpenAiChatClient, DEFAULT_OPENAI_BASE_URL};
pub use types::{CompletionRequest, ModelError};
