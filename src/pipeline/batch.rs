// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Fetch + summarize fan-out over search results
//!
//! Items run concurrently (bounded) and each writes into its own slot,
//! indexed by input position, so output order equals search order no matter
//! which item finishes first. A failed fetch empties the slot; a failed
//! summary keeps the item with `summary = None`.

use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::summarizer::Summarizer;
use super::types::{ProcessedResult, RefinedQuery};
use crate::search::content::{truncate_chars, ContentFetcher};
use crate::search::SearchResult;

/// Size limits and concurrency for one batch
#[derive(Debug, Clone, Copy)]
pub struct BatchLimits {
    pub max_content_chars: usize,
    pub max_summary_chars: usize,
    pub max_concurrent_items: usize,
}

/// The per-item stage of the pipeline
pub struct BatchStage<'a> {
    fetcher: &'a dyn ContentFetcher,
    summarizer: Summarizer<'a>,
    limits: BatchLimits,
}

impl<'a> BatchStage<'a> {
    pub fn new(
        fetcher: &'a dyn ContentFetcher,
        summarizer: Summarizer<'a>,
        limits: BatchLimits,
    ) -> Self {
        Self {
            fetcher,
            summarizer,
            limits,
        }
    }

    /// Process every search result
    ///
    /// Items not yet started when `cancel` fires are skipped; the caller
    /// decides what a cancelled batch means.
    pub async fn process(
        &self,
        results: &[SearchResult],
        query_context: &RefinedQuery,
        cancel: &CancellationToken,
    ) -> Vec<ProcessedResult> {
        let mut slots: Vec<Option<ProcessedResult>> = vec![None; results.len()];

        // Owned items keep the stream future `Send` for spawned runs
        let finished: Vec<(usize, Option<ProcessedResult>)> =
            stream::iter(results.iter().cloned().enumerate())
                .map(|(slot, result)| async move {
                    if cancel.is_cancelled() {
                        return (slot, None);
                    }
                    (slot, self.process_item(&result, query_context).await)
                })
                .buffer_unordered(self.limits.max_concurrent_items.max(1))
                .collect()
                .await;

        for (slot, processed) in finished {
            slots[slot] = processed;
        }

        let processed: Vec<ProcessedResult> = slots.into_iter().flatten().collect();
        info!(
            "Processed {}/{} search results",
            processed.len(),
            results.len()
        );
        processed
    }

    async fn process_item(
        &self,
        result: &SearchResult,
        query_context: &RefinedQuery,
    ) -> Option<ProcessedResult> {
        let Some(mut content) = self
            .fetcher
            .fetch(&result.url, self.limits.max_content_chars)
            .await
        else {
            debug!("Skipping rank {} ({}): no content", result.rank, result.url);
            return None;
        };
        // The cap holds even for fetchers that ignore `max_chars`
        content.text = truncate_chars(&content.text, self.limits.max_content_chars);

        let summary = self
            .summarizer
            .summarize(&content, query_context, self.limits.max_summary_chars)
            .await;

        Some(ProcessedResult {
            rank: result.rank,
            url: result.url.clone(),
            title: result.snippet.clone(),
            summary,
        })
    }
}
