// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Language-model trait definition

use async_trait::async_trait;

use super::types::{CompletionRequest, ModelError};

/// A chat-style language model producing one text completion per call
///
/// Implementations make exactly one attempt per call; retries are not
/// part of the contract.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Run one completion
    ///
    /// # Returns
    /// The completion text (never empty), or the reason the call failed
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ModelError>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}
