// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Final synthesis of all summaries into one cited narrative

use tracing::{info, warn};

use super::types::{ProcessedResult, RefinedQuery};
use crate::llm::{CompletionRequest, LanguageModel};

/// Combines processed results into a narrative answer
pub struct Synthesizer<'a> {
    model: &'a dyn LanguageModel,
    model_id: &'a str,
    temperature: f32,
}

impl<'a> Synthesizer<'a> {
    pub fn new(model: &'a dyn LanguageModel, model_id: &'a str, temperature: f32) -> Self {
        Self {
            model,
            model_id,
            temperature,
        }
    }

    pub fn instruction(query_context: &RefinedQuery) -> String {
        format!(
            "Based on the search results for the query: '{}', provide a detailed, \
             chronological response. Cite all sources at the end of your answer.",
            query_context
        )
    }

    /// Produce the narrative; `None` if the model call fails
    ///
    /// Results are sent as a JSON array in the output wire format
    /// (`result_rank`, `webpage_url`, `result_title`, `webpage_summary`).
    pub async fn synthesize(
        &self,
        query_context: &RefinedQuery,
        processed_results: &[ProcessedResult],
    ) -> Option<String> {
        let payload = match serde_json::to_string(processed_results) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Could not serialize results for synthesis: {}", e);
                return None;
            }
        };

        let request =
            CompletionRequest::new(self.model_id, Self::instruction(query_context), payload)
                .with_temperature(self.temperature);

        match self.model.complete(&request).await {
            Ok(narrative) => {
                info!(
                    "Synthesized narrative of {} chars from {} results",
                    narrative.chars().count(),
                    processed_results.len()
                );
                Some(narrative)
            }
            Err(e) => {
                warn!("Comprehensive response generation failed: {}", e);
                None
            }
        }
    }
}
