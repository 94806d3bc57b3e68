// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Output invariants that hold for any mix of stage failures

use super::stubs::{hit, pipeline, StubFetcher, StubModel, StubSearch};
use byob_search::pipeline::{PipelineConfig, PipelineOverrides, RunRequest, Setting};
use std::collections::HashSet;
use std::sync::Arc;

/// Pages for hits 1..=n, skipping every rank in `missing`
fn pages(n: usize, missing: &[usize]) -> Vec<(String, String)> {
    (1..=n)
        .filter(|i| !missing.contains(i))
        .map(|i| (format!("https://example.com/{}", i), format!("page {}", i)))
        .collect()
}

fn fetcher(pages: &[(String, String)]) -> StubFetcher {
    let borrowed: Vec<(&str, &str)> = pages
        .iter()
        .map(|(u, t)| (u.as_str(), t.as_str()))
        .collect();
    StubFetcher::with_pages(&borrowed)
}

#[tokio::test]
async fn test_ranks_are_an_ordered_subsequence() {
    let cases: &[(usize, &[usize])] = &[
        (10, &[]),
        (10, &[1]),
        (10, &[10]),
        (10, &[2, 4, 6, 8]),
        (5, &[1, 2, 3, 4, 5]),
        (1, &[]),
    ];

    for (n, missing) in cases {
        let search = Arc::new(StubSearch::with_hits((1..=*n).map(hit).collect()));
        let fetcher = Arc::new(fetcher(&pages(*n, missing)));
        let model = Arc::new(StubModel::new("term"));
        let output = pipeline(search, fetcher, model)
            .run(RunRequest::new("query"))
            .await
            .unwrap();

        let ranks: Vec<usize> = output.processed_results.iter().map(|r| r.rank).collect();
        let expected: Vec<usize> = (1..=*n).filter(|i| !missing.contains(i)).collect();
        assert_eq!(ranks, expected, "n={} missing={:?}", n, missing);

        // Absent content never produces a result for that URL
        for result in &output.processed_results {
            assert!(!missing.contains(&result.rank));
            assert_eq!(result.url, format!("https://example.com/{}", result.rank));
        }
    }
}

#[tokio::test]
async fn test_summary_failure_keeps_exactly_one_entry() {
    let search = Arc::new(StubSearch::with_hits(vec![hit(1), hit(2), hit(3)]));
    let fetcher = Arc::new(fetcher(&pages(3, &[])));
    let mut model = StubModel::new("term");
    model.failing_pages = HashSet::from(["page 2".to_string()]);

    let output = pipeline(search, fetcher, Arc::new(model))
        .run(RunRequest::new("query"))
        .await
        .unwrap();

    let for_rank_2: Vec<_> = output
        .processed_results
        .iter()
        .filter(|r| r.rank == 2)
        .collect();
    assert_eq!(for_rank_2.len(), 1);
    assert!(for_rank_2[0].summary.is_none());
    assert_eq!(
        output.processed_results[0].summary.as_deref(),
        Some("Summary of: page 1")
    );

    let json = serde_json::to_value(&output).unwrap();
    assert!(json["processed_search_results"][1]["webpage_summary"].is_null());
}

#[tokio::test]
async fn test_identical_inputs_give_identical_output() {
    let search = Arc::new(StubSearch::with_hits(vec![hit(1), hit(2), hit(3), hit(4)]));
    let fetcher = Arc::new(fetcher(&pages(4, &[3])));
    let model = Arc::new(StubModel::new("term"));
    let pipeline = pipeline(search, fetcher, model);

    let first = pipeline.run(RunRequest::new("query")).await.unwrap();
    let second = pipeline.run(RunRequest::new("query")).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_overrides_do_not_leak_between_runs() {
    let search = Arc::new(StubSearch::with_hits((1..=5).map(hit).collect()));
    let fetcher = Arc::new(fetcher(&pages(5, &[])));
    let model = Arc::new(StubModel::new("term"));
    let pipeline = pipeline(search.clone(), fetcher, model.clone());

    let overrides = PipelineOverrides {
        max_search_results: Some(2),
        summary_model: Some("gpt-4.1-mini".to_string()),
        recency: Setting::Clear,
        ..Default::default()
    };
    let narrow = pipeline
        .run(RunRequest::new("query").with_overrides(overrides))
        .await
        .unwrap();
    let plain = pipeline.run(RunRequest::new("query")).await.unwrap();

    assert_eq!(narrow.processed_results.len(), 2);
    assert_eq!(plain.processed_results.len(), 5);
    assert_eq!(pipeline.defaults(), &PipelineConfig::default());

    let requests = search.requests.lock().unwrap();
    assert_eq!(requests[0].num_results, 2);
    assert!(requests[0].recency.is_none());
    assert_eq!(requests[1].num_results, 10);
    assert_eq!(requests[1].recency.as_ref().map(|r| r.as_str()), Some("w1"));

    let summary_models: Vec<String> = model
        .requests
        .lock()
        .unwrap()
        .iter()
        .filter(|r| r.system_instruction.contains("summarizing"))
        .map(|r| r.model.clone())
        .collect();
    assert_eq!(summary_models.len(), 7);
    assert_eq!(
        summary_models.iter().filter(|m| *m == "gpt-4.1-mini").count(),
        2
    );
}

#[tokio::test]
async fn test_content_and_summary_caps_apply() {
    let long_page = "x".repeat(200);
    let search = Arc::new(StubSearch::with_hits(vec![hit(1)]));
    let fetcher = Arc::new(StubFetcher::with_pages(&[(
        "https://example.com/1",
        long_page.as_str(),
    )]));
    let model = Arc::new(StubModel::new("term"));
    let pipeline = pipeline(search, fetcher, model.clone());

    let overrides = PipelineOverrides {
        max_content_chars: Some(50),
        max_summary_chars: Some(30),
        ..Default::default()
    };
    let output = pipeline
        .run(RunRequest::new("query").with_overrides(overrides))
        .await
        .unwrap();

    let summary = output.processed_results[0].summary.as_deref().unwrap();
    assert_eq!(summary.chars().count(), 30);

    let requests = model.requests.lock().unwrap();
    let summarize = requests
        .iter()
        .find(|r| r.system_instruction.contains("summarizing"))
        .unwrap();
    assert_eq!(summarize.user_content.chars().count(), 50);
    assert!(summarize.system_instruction.contains("30 characters"));
}
