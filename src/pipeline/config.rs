// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Per-run pipeline configuration
//!
//! A `PipelineConfig` is an immutable value. Callers never mutate the
//! defaults; they describe changes as `PipelineOverrides` and get a new
//! value back from [`PipelineConfig::merge`].

use crate::search::google::GOOGLE_MAX_RESULTS;

/// Override for an optional setting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Setting<T> {
    /// Keep the base value
    #[default]
    Inherit,
    /// Explicitly unset
    Clear,
    /// Replace with this value
    Value(T),
}

impl<T: Clone> Setting<T> {
    fn apply(&self, base: &Option<T>) -> Option<T> {
        match self {
            Setting::Inherit => base.clone(),
            Setting::Clear => None,
            Setting::Value(v) => Some(v.clone()),
        }
    }
}

/// Settings for one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Number of search results requested
    pub max_search_results: usize,
    /// Characters kept from each fetched page
    pub max_content_chars: usize,
    /// Characters allowed in each summary
    pub max_summary_chars: usize,
    /// Model used to refine the query
    pub refine_model: String,
    /// Model used for per-page summaries
    pub summary_model: String,
    /// Model used for the final narrative
    pub synthesis_model: String,
    /// Sampling temperature for the final narrative
    pub synthesis_temperature: f32,
    /// Default site/domain restriction
    pub site_filter: Option<String>,
    /// Default recency filter, e.g. `w1`
    pub recency: Option<String>,
    /// Items fetched and summarized concurrently
    pub max_concurrent_items: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_search_results: 10,
            max_content_chars: 50_000,
            max_summary_chars: 1_000,
            refine_model: "gpt-4o-mini".to_string(),
            summary_model: "gpt-4o-mini".to_string(),
            synthesis_model: "gpt-4o".to_string(),
            synthesis_temperature: 0.0,
            site_filter: None,
            recency: Some("w1".to_string()),
            max_concurrent_items: 4,
        }
    }
}

/// Caller-supplied changes to a `PipelineConfig`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineOverrides {
    pub max_search_results: Option<usize>,
    pub max_content_chars: Option<usize>,
    pub max_summary_chars: Option<usize>,
    pub refine_model: Option<String>,
    pub summary_model: Option<String>,
    pub synthesis_model: Option<String>,
    pub synthesis_temperature: Option<f32>,
    pub site_filter: Setting<String>,
    pub recency: Setting<String>,
    pub max_concurrent_items: Option<usize>,
}

impl PipelineConfig {
    /// Return a new config with `overrides` applied on top of `self`
    pub fn merge(&self, overrides: &PipelineOverrides) -> Self {
        Self {
            max_search_results: overrides
                .max_search_results
                .unwrap_or(self.max_search_results),
            max_content_chars: overrides.max_content_chars.unwrap_or(self.max_content_chars),
            max_summary_chars: overrides.max_summary_chars.unwrap_or(self.max_summary_chars),
            refine_model: overrides
                .refine_model
                .clone()
                .unwrap_or_else(|| self.refine_model.clone()),
            summary_model: overrides
                .summary_model
                .clone()
                .unwrap_or_else(|| self.summary_model.clone()),
            synthesis_model: overrides
                .synthesis_model
                .clone()
                .unwrap_or_else(|| self.synthesis_model.clone()),
            synthesis_temperature: overrides
                .synthesis_temperature
                .unwrap_or(self.synthesis_temperature),
            site_filter: overrides.site_filter.apply(&self.site_filter),
            recency: overrides.recency.apply(&self.recency),
            max_concurrent_items: overrides
                .max_concurrent_items
                .unwrap_or(self.max_concurrent_items),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_search_results == 0 {
            return Err("max_search_results must be at least 1".to_string());
        }
        if self.max_search_results > GOOGLE_MAX_RESULTS {
            return Err(format!(
                "max_search_results cannot exceed {}",
                GOOGLE_MAX_RESULTS
            ));
        }
        if self.max_content_chars == 0 {
            return Err("max_content_chars must be at least 1".to_string());
        }
        if self.max_summary_chars == 0 {
            return Err("max_summary_chars must be at least 1".to_string());
        }
        if self.max_concurrent_items == 0 {
            return Err("max_concurrent_items must be at least 1".to_string());
        }
        for (name, model) in [
            ("refine_model", &self.refine_model),
            ("summary_model", &self.summary_model),
            ("synthesis_model", &self.synthesis_model),
        ] {
            if model.trim().is_empty() {
                return Err(format!("{} must not be empty", name));
            }
        }
        if !(0.0..=2.0).contains(&self.synthesis_temperature) {
            return Err("synthesis_temperature must be between 0 and 2".to_string());
        }
        Ok(())
    }
}
