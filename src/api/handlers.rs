// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::version;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub tool_initialized: bool,
    pub version: String,
}

impl HealthResponse {
    /// The pipeline is built before the router, so a serving process is
    /// always initialized.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            message: "BYOB Backend is running".to_string(),
            tool_initialized: true,
            version: version::VERSION_NUMBER.to_string(),
        }
    }
}

/// GET /api/health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
