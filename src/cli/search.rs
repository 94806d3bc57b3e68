// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use crate::config::Credentials;
use crate::pipeline::{
    Pipeline, PipelineConfig, PipelineOutput, PipelineOverrides, RunRequest,
};

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Free-form question or query
    pub query: String,

    /// Restrict results to one site/domain (e.g. arxiv.org)
    #[arg(long)]
    pub site: Option<String>,

    /// Recency filter: d<N>, w<N>, m<N> or y<N> (default w1)
    #[arg(long)]
    pub recency: Option<String>,

    /// Number of search results to process (1-10)
    #[arg(long)]
    pub max_results: Option<usize>,

    /// Print the full pipeline output as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    pub fn to_run_request(&self) -> RunRequest {
        let mut run = RunRequest::new(self.query.clone()).with_overrides(PipelineOverrides {
            max_search_results: self.max_results,
            ..Default::default()
        });
        run.site_filter = self.site.clone();
        run.recency = self.recency.clone();
        run
    }
}

/// Run one pipeline and print the result
pub async fn run_search(args: SearchArgs) -> Result<()> {
    dotenv::dotenv().ok();

    let credentials = Credentials::from_env()?;
    let pipeline = Pipeline::from_credentials(&credentials, PipelineConfig::default())
        .context("Failed to build search pipeline")?;

    info!("Searching: {}", args.query);
    let output = pipeline.run(args.to_run_request()).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render_text(&output));
    }
    Ok(())
}

/// Human-readable rendering: search term, narrative, then sources
pub fn render_text(output: &PipelineOutput) -> String {
    let mut text = format!("🔎 Search term: {}\n\n", output.refined_query);

    match &output.narrative {
        Some(narrative) => {
            text.push_str(narrative);
            text.push('\n');
        }
        None => text.push_str("⚠️  No answer could be generated.\n"),
    }

    if !output.processed_results.is_empty() {
        text.push_str("\nSources:\n");
        for result in &output.processed_results {
            text.push_str(&format!("  [{}] {}\n", result.rank, result.url));
        }
    }
    text
}
