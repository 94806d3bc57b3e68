// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Per-page summarization

use tracing::{debug, warn};

use super::types::RefinedQuery;
use crate::llm::{CompletionRequest, LanguageModel};
use crate::search::content::{truncate_chars, RetrievedContent};

/// Condenses one page into a bounded-length summary
pub struct Summarizer<'a> {
    model: &'a dyn LanguageModel,
    model_id: &'a str,
}

impl<'a> Summarizer<'a> {
    pub fn new(model: &'a dyn LanguageModel, model_id: &'a str) -> Self {
        Self { model, model_id }
    }

    /// System instruction fixing the query context and the budget
    pub fn instruction(query_context: &RefinedQuery, max_chars: usize) -> String {
        format!(
            "You are an AI assistant tasked with summarizing content relevant to '{}'. \
             Please provide a concise summary in {} characters or less.",
            query_context, max_chars
        )
    }

    /// Summarize `content`; `None` if the model call fails
    ///
    /// The result never exceeds `max_chars` characters.
    pub async fn summarize(
        &self,
        content: &RetrievedContent,
        query_context: &RefinedQuery,
        max_chars: usize,
    ) -> Option<String> {
        let request = CompletionRequest::new(
            self.model_id,
            Self::instruction(query_context, max_chars),
            content.text.as_str(),
        );

        match self.model.complete(&request).await {
            Ok(summary) => {
                let summary = truncate_chars(summary.trim(), max_chars);
                debug!("Summarized {} into {} chars", content.url, summary.chars().count());
                Some(summary).filter(|s| !s.is_empty())
            }
            Err(e) => {
                warn!("Content summarization failed for {}: {}", content.url, e);
                None
            }
        }
    }
}
