// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Query refinement: free-form query to a short search term

use tracing::debug;

use super::types::RefinedQuery;
use crate::llm::{CompletionRequest, LanguageModel, ModelError};

pub const REFINE_INSTRUCTION: &str =
    "Provide a google search term based on search query in 3-4 words";

/// Rewrites the user's query into a compact search phrase
pub struct QueryRefiner<'a> {
    model: &'a dyn LanguageModel,
    model_id: &'a str,
}

impl<'a> QueryRefiner<'a> {
    pub fn new(model: &'a dyn LanguageModel, model_id: &'a str) -> Self {
        Self { model, model_id }
    }

    /// Refine `query`; the model's text is returned trimmed
    ///
    /// Single attempt. A blank completion is `ModelError::EmptyCompletion`.
    pub async fn refine(&self, query: &str) -> Result<RefinedQuery, ModelError> {
        let request = CompletionRequest::new(self.model_id, REFINE_INSTRUCTION, query);
        let text = self.model.complete(&request).await?;
        debug!("Refiner ({}) returned: {:?}", self.model.name(), text);
        RefinedQuery::new(text).ok_or(ModelError::EmptyCompletion)
    }
}
