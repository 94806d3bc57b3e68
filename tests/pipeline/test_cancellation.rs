// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Cancellation at stage boundaries

use super::stubs::{hit, StubFetcher, StubModel, StubSearch};
use async_trait::async_trait;
use byob_search::llm::{CompletionRequest, LanguageModel, ModelError};
use byob_search::pipeline::{
    Pipeline, PipelineConfig, PipelineError, PipelineOverrides, RunRequest, REFINE_INSTRUCTION,
};
use byob_search::search::content::{ContentFetcher, RetrievedContent};
use byob_search::search::{SearchConfig, SearchService};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

/// Fires the token while answering the refinement call
struct CancellingModel {
    token: CancellationToken,
    calls: AtomicUsize,
}

#[async_trait]
impl LanguageModel for CancellingModel {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if request.system_instruction == REFINE_INSTRUCTION {
            self.token.cancel();
        }
        Ok("term".to_string())
    }

    fn name(&self) -> &'static str {
        "cancelling"
    }
}

#[tokio::test]
async fn test_cancel_during_refinement_stops_before_search() {
    let token = CancellationToken::new();
    let search = Arc::new(StubSearch::with_hits(vec![hit(1), hit(2)]));
    let fetcher = Arc::new(StubFetcher::with_pages(&[("https://example.com/1", "page")]));
    let model = Arc::new(CancellingModel {
        token: token.clone(),
        calls: AtomicUsize::new(0),
    });
    let pipeline = Pipeline::new(
        SearchService::new(search.clone(), &SearchConfig::default()),
        fetcher.clone(),
        model.clone(),
        PipelineConfig::default(),
    );

    let err = pipeline
        .run_with_cancellation(RunRequest::new("query"), &token)
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Cancelled));
    assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    assert_eq!(search.request_count(), 0);
    assert!(fetcher.fetched.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_uncancelled_token_runs_to_completion() {
    let token = CancellationToken::new();
    let search = Arc::new(StubSearch::with_hits(vec![hit(1)]));
    let fetcher = Arc::new(StubFetcher::with_pages(&[("https://example.com/1", "page")]));
    let model = Arc::new(super::stubs::StubModel::new("term"));
    let pipeline = super::stubs::pipeline(search, fetcher, model);

    let output = pipeline
        .run_with_cancellation(RunRequest::new("query"), &token)
        .await
        .unwrap();
    assert_eq!(output.processed_results.len(), 1);
    assert!(output.narrative.is_some());
}

/// Fires the token once the first page has been fetched
struct CancellingFetcher {
    token: CancellationToken,
    fetched: Mutex<Vec<String>>,
}

#[async_trait]
impl ContentFetcher for CancellingFetcher {
    async fn fetch(&self, url: &str, _max_chars: usize) -> Option<RetrievedContent> {
        self.fetched.lock().unwrap().push(url.to_string());
        self.token.cancel();
        Some(RetrievedContent {
            url: url.to_string(),
            text: "page".to_string(),
        })
    }
}

#[tokio::test]
async fn test_cancel_mid_batch_stops_remaining_items() {
    let token = CancellationToken::new();
    let search = Arc::new(StubSearch::with_hits(vec![hit(1), hit(2), hit(3)]));
    let fetcher = Arc::new(CancellingFetcher {
        token: token.clone(),
        fetched: Mutex::new(Vec::new()),
    });
    let model = Arc::new(StubModel::new("term"));
    let pipeline = Pipeline::new(
        SearchService::new(search, &SearchConfig::default()),
        fetcher.clone(),
        model.clone(),
        PipelineConfig::default(),
    );
    let serial = PipelineOverrides {
        max_concurrent_items: Some(1),
        ..Default::default()
    };

    let err = pipeline
        .run_with_cancellation(RunRequest::new("query").with_overrides(serial), &token)
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Cancelled));
    assert_eq!(
        *fetcher.fetched.lock().unwrap(),
        vec!["https://example.com/1".to_string()]
    );
    assert!(model.synthesis_requests().is_empty());
}

#[tokio::test]
async fn test_run_on_spawned_task() {
    let search = Arc::new(StubSearch::with_hits(vec![hit(1), hit(2)]));
    let fetcher = Arc::new(StubFetcher::with_pages(&[
        ("https://example.com/1", "one"),
        ("https://example.com/2", "two"),
    ]));
    let model = Arc::new(StubModel::new("term"));
    let pipeline = Arc::new(super::stubs::pipeline(search, fetcher, model));

    let handle = tokio::spawn({
        let pipeline = pipeline.clone();
        async move { pipeline.run(RunRequest::new("query")).await }
    });

    let output = handle.await.unwrap().unwrap();
    let ranks: Vec<usize> = output.processed_results.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2]);
}
