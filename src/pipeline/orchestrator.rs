// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! End-to-end pipeline: refine → search → fetch + summarize → synthesize

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use super::batch::{BatchLimits, BatchStage};
use super::config::{PipelineConfig, PipelineOverrides};
use super::errors::PipelineError;
use super::refiner::QueryRefiner;
use super::summarizer::Summarizer;
use super::synthesizer::Synthesizer;
use super::types::PipelineOutput;
use crate::config::{ConfigurationError, Credentials};
use crate::llm::{LanguageModel, LlmConfig, OpenAiChatClient};
use crate::search::content::{ContentFetchConfig, ContentFetcher, HttpContentFetcher};
use crate::search::{GoogleSearchProvider, Recency, SearchConfig, SearchService};

/// One caller request
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    /// Free-form user query
    pub query: String,
    /// Site/domain restriction; takes precedence over the config value
    pub site_filter: Option<String>,
    /// Recency filter; takes precedence over the config value
    pub recency: Option<String>,
    /// Changes to the pipeline defaults for this run only
    pub overrides: PipelineOverrides,
}

impl RunRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_site_filter(mut self, site_filter: impl Into<String>) -> Self {
        self.site_filter = Some(site_filter.into());
        self
    }

    pub fn with_recency(mut self, recency: impl Into<String>) -> Self {
        self.recency = Some(recency.into());
        self
    }

    pub fn with_overrides(mut self, overrides: PipelineOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Everything a run needs, resolved and validated before any external call
struct RunPlan {
    config: PipelineConfig,
    site_filter: Option<String>,
    recency: Option<Recency>,
}

/// The retrieval-and-synthesis pipeline over injected clients
///
/// Holds no per-run state; one instance serves concurrent runs.
pub struct Pipeline {
    search: SearchService,
    fetcher: Arc<dyn ContentFetcher>,
    model: Arc<dyn LanguageModel>,
    defaults: PipelineConfig,
}

impl Pipeline {
    pub fn new(
        search: SearchService,
        fetcher: Arc<dyn ContentFetcher>,
        model: Arc<dyn LanguageModel>,
        defaults: PipelineConfig,
    ) -> Self {
        Self {
            search,
            fetcher,
            model,
            defaults,
        }
    }

    /// Build the production pipeline (Google search, HTTP fetcher, OpenAI)
    ///
    /// Service settings come from the environment; credentials are explicit.
    pub fn from_credentials(
        credentials: &Credentials,
        defaults: PipelineConfig,
    ) -> Result<Self, PipelineError> {
        defaults.validate().map_err(ConfigurationError::Invalid)?;

        let search_config = SearchConfig::from_env();
        search_config
            .validate()
            .map_err(ConfigurationError::Invalid)?;
        let provider = GoogleSearchProvider::new(
            credentials.google_api_key.clone(),
            credentials.google_cse_id.clone(),
            &search_config,
        )
        .map_err(|e| ConfigurationError::Invalid(e.to_string()))?;

        let fetch_config = ContentFetchConfig::from_env();
        fetch_config.validate().map_err(ConfigurationError::Invalid)?;
        let fetcher = HttpContentFetcher::new(fetch_config)
            .map_err(|e| ConfigurationError::Invalid(e.to_string()))?;

        let model = OpenAiChatClient::new(credentials.openai_api_key.clone(), &LlmConfig::from_env())
            .map_err(|e| ConfigurationError::Invalid(e.to_string()))?;

        Ok(Self::new(
            SearchService::new(Arc::new(provider), &search_config),
            Arc::new(fetcher),
            Arc::new(model),
            defaults,
        ))
    }

    /// Build the production pipeline from environment credentials
    pub fn from_env() -> Result<Self, PipelineError> {
        let credentials = Credentials::from_env()?;
        Self::from_credentials(&credentials, PipelineConfig::default())
    }

    /// Defaults every run starts from
    pub fn defaults(&self) -> &PipelineConfig {
        &self.defaults
    }

    /// Run the pipeline to completion
    pub async fn run(&self, request: RunRequest) -> Result<PipelineOutput, PipelineError> {
        self.run_with_cancellation(request, &CancellationToken::new())
            .await
    }

    /// Run the pipeline, stopping at the next stage or item boundary once
    /// `cancel` fires
    pub async fn run_with_cancellation(
        &self,
        request: RunRequest,
        cancel: &CancellationToken,
    ) -> Result<PipelineOutput, PipelineError> {
        let run_id = Uuid::new_v4();
        self.execute(request, cancel)
            .instrument(info_span!("pipeline_run", %run_id))
            .await
    }

    fn resolve(&self, request: &RunRequest) -> Result<RunPlan, PipelineError> {
        let config = self.defaults.merge(&request.overrides);
        config.validate().map_err(PipelineError::InvalidConfig)?;

        let site_filter = request
            .site_filter
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .or_else(|| config.site_filter.clone());

        let recency = request
            .recency
            .as_deref()
            .or(config.recency.as_deref())
            .map(Recency::parse)
            .transpose()
            .map_err(|e| PipelineError::InvalidRecency(e.to_string()))?;

        Ok(RunPlan {
            config,
            site_filter,
            recency,
        })
    }

    fn checkpoint(cancel: &CancellationToken) -> Result<(), PipelineError> {
        if cancel.is_cancelled() {
            Err(PipelineError::Cancelled)
        } else {
            Ok(())
        }
    }

    async fn execute(
        &self,
        request: RunRequest,
        cancel: &CancellationToken,
    ) -> Result<PipelineOutput, PipelineError> {
        if request.query.trim().is_empty() {
            return Err(PipelineError::InvalidQuery(
                "query must not be blank".to_string(),
            ));
        }
        let plan = self.resolve(&request)?;
        let config = &plan.config;

        Self::checkpoint(cancel)?;
        let refined = QueryRefiner::new(self.model.as_ref(), &config.refine_model)
            .refine(&request.query)
            .await
            .map_err(PipelineError::Refinement)?;
        info!("Refined '{}' into search term '{}'", request.query, refined);

        Self::checkpoint(cancel)?;
        info!(
            "Search parameters: provider={}, query={}, recency={}, site={}",
            self.search.provider_name(),
            refined,
            plan.recency.as_ref().map_or("none", |r| r.as_str()),
            plan.site_filter.as_deref().unwrap_or("any")
        );
        let results = self
            .search
            .search(
                refined.as_str(),
                config.max_search_results,
                plan.site_filter.as_deref(),
                plan.recency.as_ref(),
            )
            .await;

        Self::checkpoint(cancel)?;
        let batch = BatchStage::new(
            self.fetcher.as_ref(),
            Summarizer::new(self.model.as_ref(), &config.summary_model),
            BatchLimits {
                max_content_chars: config.max_content_chars,
                max_summary_chars: config.max_summary_chars,
                max_concurrent_items: config.max_concurrent_items,
            },
        );
        let processed_results = batch.process(&results, &refined, cancel).await;

        Self::checkpoint(cancel)?;
        let narrative = Synthesizer::new(
            self.model.as_ref(),
            &config.synthesis_model,
            config.synthesis_temperature,
        )
        .synthesize(&refined, &processed_results)
        .await;

        Ok(PipelineOutput {
            refined_query: refined,
            narrative,
            processed_results,
        })
    }
}
