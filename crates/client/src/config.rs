//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `NEXUS_API_BASE_URL` - Base URL of the REST backend
//!   (default: `http://localhost:5000/api`)
//! - `NEXUS_AUTH_TOKEN` - Bearer token attached to outgoing requests
//! - `NEXUS_STORE_PATH` - Path of the persisted store file
//!   (default: `nexusshop-store.json`)
//! - `NEXUS_TOKEN_PATH` - Path of the persisted auth token file
//!   (default: `nexusshop-token`)

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
const DEFAULT_STORE_PATH: &str = "nexusshop-store.json";
const DEFAULT_TOKEN_PATH: &str = "nexusshop-token";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client application configuration.
///
/// Implements `Debug` manually to redact the auth token.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the REST backend (may already carry an `/api` prefix)
    pub api_base_url: String,
    /// Bearer token for authenticated requests, if already known
    pub auth_token: Option<SecretString>,
    /// Path the store blob is persisted to
    pub store_path: PathBuf,
    /// Path the auth token is persisted to
    pub token_path: PathBuf,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base_url", &self.api_base_url)
            .field(
                "auth_token",
                &self.auth_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("store_path", &self.store_path)
            .field("token_path", &self.token_path)
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the base URL is present but not a valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_env_or_default("NEXUS_API_BASE_URL", DEFAULT_API_BASE_URL);
        url::Url::parse(&api_base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("NEXUS_API_BASE_URL".to_string(), e.to_string())
        })?;

        let auth_token = get_optional_env("NEXUS_AUTH_TOKEN").map(SecretString::from);
        let store_path = PathBuf::from(get_env_or_default("NEXUS_STORE_PATH", DEFAULT_STORE_PATH));
        let token_path = PathBuf::from(get_env_or_default("NEXUS_TOKEN_PATH", DEFAULT_TOKEN_PATH));

        Ok(Self {
            api_base_url,
            auth_token,
            store_path,
            token_path,
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            auth_token: None,
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            token_path: PathBuf::from(DEFAULT_TOKEN_PATH),
        }
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
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
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:5000/api");
        assert!(config.auth_token.is_none());
        assert_eq!(config.store_path, PathBuf::from("nexusshop-store.json"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig {
            auth_token: Some(SecretString::from("super-secret-bearer")),
            ..ClientConfig::default()
        };
        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super-secret-bearer"));
    }
}
