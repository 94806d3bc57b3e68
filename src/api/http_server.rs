// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};

use super::handlers::health_handler;
use super::search::search_handler;
use crate::pipeline::Pipeline;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

/// Router with every endpoint and permissive CORS
pub fn create_router(pipeline: Arc<Pipeline>) -> Router {
    let state = AppState { pipeline };

    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/search", post(search_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn start_server(pipeline: Arc<Pipeline>, addr: SocketAddr) -> anyhow::Result<()> {
    let app = create_router(pipeline);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("BYOB API listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
