//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOPFRONT_API_BASE_URL` - REST backend base URL
//!   (default: `http://localhost:8080/api`)
//! - `SHOPFRONT_REQUEST_TIMEOUT_SECS` - per-request timeout in seconds
//!   (default: 30)
//! - `SHOPFRONT_STATE_PATH` - path of the persisted local snapshot
//!   (default: `$HOME/.shopfront/state.json`, falling back to the working
//!   directory when `HOME` is unset)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default REST backend base URL.
const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Default per-request timeout. Every remote cart operation is bounded by
/// this; a timeout is treated as a failure, not retried.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST backend (e.g. `http://localhost:8080/api`).
    pub api_base_url: Url,
    /// Fixed timeout applied to every request.
    pub request_timeout: Duration,
    /// Location of the persisted snapshot (guest cart + credential).
    pub state_path: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a set variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = match std::env::var("SHOPFRONT_API_BASE_URL") {
            Ok(raw) => Url::parse(&raw).map_err(|e| {
                ConfigError::InvalidEnvVar("SHOPFRONT_API_BASE_URL".to_string(), e.to_string())
            })?,
            Err(_) => Url::parse(DEFAULT_API_BASE_URL)
                .map_err(|e| ConfigError::InvalidEnvVar("default".to_string(), e.to_string()))?,
        };

        let request_timeout = match std::env::var("SHOPFRONT_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(raw.parse().map_err(|_| {
                ConfigError::InvalidEnvVar("SHOPFRONT_REQUEST_TIMEOUT_SECS".to_string(), raw)
            })?),
            Err(_) => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        let state_path = std::env::var("SHOPFRONT_STATE_PATH").map_or_else(
            |_| default_state_path(),
            PathBuf::from,
        );

        Ok(Self {
            api_base_url,
            request_timeout,
            state_path,
        })
    }
}

fn default_state_path() -> PathBuf {
    std::env::var("HOME").map_or_else(
        |_| PathBuf::from(".shopfront/state.json"),
        |home| PathBuf::from(home).join(".shopfront/state.json"),
    )
}
