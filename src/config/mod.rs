// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process configuration
//!
//! Credentials and server settings are read once at startup. A missing
//! credential is fatal: no pipeline can be built without it.

use std::env;
use std::net::{IpAddr, SocketAddr};
use thiserror::Error;

/// Fatal configuration problems detected at construction time
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Required environment variable missing or empty
    #[error("Missing required credential {0}. Set it in the environment or .env file.")]
    MissingCredential(&'static str),

    /// A setting has an unusable value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// API credentials for the search index and the language model
#[derive(Clone)]
pub struct Credentials {
    pub openai_api_key: String,
    pub google_api_key: String,
    pub google_cse_id: String,
}

impl Credentials {
    /// Load credentials from `OPENAI_API_KEY`, `GOOGLE_API_KEY`, `GOOGLE_CSE_ID`
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load credentials through an arbitrary lookup (used by tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigurationError::MissingCredential(name))
        };

        Ok(Self {
            openai_api_key: require("OPENAI_API_KEY")?,
            google_api_key: require("GOOGLE_API_KEY")?,
            google_cse_id: require("GOOGLE_CSE_ID")?,
        })
    }
}

// Keys never reach logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("openai_api_key", &"<redacted>")
            .field("google_api_key", &"<redacted>")
            .field("google_cse_id", &self.google_cse_id)
            .finish()
    }
}

/// HTTP server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Load configuration from `BYOB_HOST` / `BYOB_PORT`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("BYOB_HOST").unwrap_or(defaults.host),
            port: env::var("BYOB_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
        }
    }

    /// Socket address to bind
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigurationError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ConfigurationError::Invalid(format!("bad BYOB_HOST '{}'", self.host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
        }
    }
}
