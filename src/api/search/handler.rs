// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search API endpoint handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::info;

use super::request::SearchApiRequest;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::pipeline::PipelineOutput;

/// POST /api/search - Run the search-augmented answer pipeline
///
/// # Request
/// - `query`: Search query string (required, at least 2 chars)
/// - `site_filter`: Optional site/domain restriction
/// - `recency`: Optional recency filter (`d7`, `w1`, `m3`, `y1`)
///
/// # Response
/// The serialized `PipelineOutput`.
///
/// # Errors
/// - 400 Bad Request: Missing/short query, malformed body or recency
/// - 500 Internal Server Error: Query refinement failed
pub async fn search_handler(
    State(state): State<AppState>,
    body: Result<Json<SearchApiRequest>, JsonRejection>,
) -> Result<Json<PipelineOutput>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let run = request.into_run_request().map_err(ApiError::BadRequest)?;

    info!("Processing search query: {}", run.query);
    let output = state.pipeline.run(run).await?;

    info!(
        "Search complete: '{}' with {} processed results",
        output.refined_query,
        output.processed_results.len()
    );
    Ok(Json(output))
}
