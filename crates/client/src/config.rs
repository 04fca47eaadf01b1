//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SAAHAZ_API_URL` - Backend origin including the `/api` prefix
//!   (default: `http://localhost:8001/api`, the local development backend)
//! - `SAAHAZ_STATE_DIR` - Directory for persisted client state
//!   (default: `.saahaz` under the current directory)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default backend origin for local development.
const DEFAULT_API_URL: &str = "http://localhost:8001/api";

/// Default directory for persisted client state.
const DEFAULT_STATE_DIR: &str = ".saahaz";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend REST API, including the `/api` prefix.
    pub api_url: Url,
    /// Directory where the cart snapshot and credential are persisted.
    pub state_dir: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `SAAHAZ_API_URL` is present but not a valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = get_env_or_default("SAAHAZ_API_URL", DEFAULT_API_URL)
            .parse::<Url>()
            .map_err(|e| ConfigError::InvalidEnvVar("SAAHAZ_API_URL".to_string(), e.to_string()))?;
        let state_dir = PathBuf::from(get_env_or_default("SAAHAZ_STATE_DIR", DEFAULT_STATE_DIR));

        Ok(Self { api_url, state_dir })
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_url_parses() {
        let url = DEFAULT_API_URL.parse::<Url>().unwrap();
        assert_eq!(url.path(), "/api");
    }

    #[test]
    fn test_env_or_default_falls_back() {
        let value = get_env_or_default("SAAHAZ_TEST_UNSET_VAR", "fallback");
        assert_eq!(value, "fallback");
    }
}
