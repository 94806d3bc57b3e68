// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Web search API endpoint
//!
//! Provides the `/api/search` HTTP endpoint for the answer pipeline.

pub mod handler;
pub mod request;

pub use handler::search_handler;
pub use request::{SearchApiRequest, MIN_QUERY_CHARS};
