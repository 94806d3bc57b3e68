// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Request and error types for language-model calls

use thiserror::Error;

/// A single-turn completion request: one system instruction, one user payload
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Model identifier, e.g. `gpt-4o-mini`
    pub model: String,
    /// System instruction
    pub system_instruction: String,
    /// User content
    pub user_content: String,
    /// Sampling temperature; provider default when `None`
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    pub fn new(
        model: impl Into<String>,
        system_instruction: impl Into<String>,
        user_content: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            system_instruction: system_instruction.into(),
            user_content: user_content.into(),
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Failure of a language-model call
///
/// An empty completion is a failure (`EmptyCompletion`), never an `Ok("")`.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Could not reach the model endpoint
    #[error("Model request failed: {0}")]
    Transport(String),

    /// Model call exceeded its timeout
    #[error("Model request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Endpoint answered with a non-success status
    #[error("Model API error {status}: {body}")]
    Api { status: u16, body: String },

    /// Response body was not a chat completion
    #[error("Failed to parse model response: {0}")]
    Parse(String),

    /// Completion had no text
    #[error("Model returned an empty completion")]
    EmptyCompletion,
}
