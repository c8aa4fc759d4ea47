//! CLI command implementations.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod orders;
pub mod rag;

use nexus_shop_client::api::ApiClient;
use nexus_shop_client::config::{ClientConfig, ConfigError};
use nexus_shop_client::store::{JsonFilePersister, Store, TokenStore};
use secrecy::SecretString;
use thiserror::Error;

/// Errors shared across CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("API request failed: {0}")]
    Api(#[from] nexus_shop_client::ApiError),

    #[error("persistence error: {0}")]
    Persist(#[from] nexus_shop_client::store::PersistError),

    #[error("I/O error reading {path}: {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid JSON metadata: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error("{0}")]
    Invalid(String),
}

/// Shared command context: configuration, API client, and the persisted
/// session token.
pub struct Context {
    pub config: ClientConfig,
    pub client: ApiClient,
    pub tokens: TokenStore,
}

impl Context {
    /// Build the context from environment configuration, attaching any
    /// previously persisted auth token.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = ClientConfig::from_env()?;
        let client = ApiClient::new(&config);
        let tokens = TokenStore::new(&config.token_path);

        if !client.has_auth_token()
            && let Ok(Some(token)) = tokens.load()
        {
            client.set_auth_token(SecretString::from(token));
        }

        Ok(Self {
            config,
            client,
            tokens,
        })
    }

    /// Open the persisted store, hydrating from disk.
    #[must_use]
    pub fn open_store(&self) -> Store {
        Store::with_persister(Box::new(JsonFilePersister::new(&self.config.store_path)))
    }
}
