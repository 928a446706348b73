//! Application configuration loaded from environment variables.
//!
//! The app shell loads this once at startup and hands it to the
//! `SessionContext`; nothing else reads the environment.

use std::env;

/// All network operations use the same bounded timeout (seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend API, without a trailing slash
    pub api_base_url: String,
    /// Connect/total timeout applied to every HTTP request (seconds)
    pub request_timeout_secs: u64,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            api_base_url: env::var("NUTRACK_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .map_err(|_| ConfigError::Missing("NUTRACK_API_URL"))?,
            request_timeout_secs: env::var("NUTRACK_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
