// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use byob_search::{
    api::start_server,
    config::{Credentials, ServerConfig},
    pipeline::{Pipeline, PipelineConfig},
    version,
};
use std::{env, sync::Arc};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    println!("🚀 Starting BYOB Search Backend...\n");
    println!("📦 BUILD VERSION: {}", version::VERSION);
    println!("📅 Build Date: {}", version::BUILD_DATE);
    println!("🧩 Features: {}", version::FEATURES.join(", "));
    println!();
    tracing::info!("{}", version::get_version_string());

    // Missing credentials abort startup
    let credentials = Credentials::from_env()?;
    let pipeline = Pipeline::from_credentials(&credentials, PipelineConfig::default())?;
    println!("✅ Search pipeline initialized");

    let server_config = ServerConfig::from_env();
    let addr = server_config.socket_addr()?;

    tokio::select! {
        result = start_server(Arc::new(pipeline), addr) => result?,
        _ = tokio::signal::ctrl_c() => {
            println!("\n🛑 Shutting down...");
        }
    }

    Ok(())
}
