//! Integration tests for NexusShop.
//!
//! These run against a live backend and are skipped when none is
//! configured.
//!
//! # Running Tests
//!
//! ```bash
//! # Point at a running backend
//! export NEXUS_API_BASE_URL=http://localhost:5000/api
//!
//! cargo test -p nexus-shop-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use nexus_shop_client::api::ApiClient;
use nexus_shop_client::config::ClientConfig;

/// Shared context for live-backend tests.
pub struct TestContext {
    pub client: ApiClient,
    pub base_url: String,
}

impl TestContext {
    /// Build a context when a backend is configured; `None` means the
    /// test should be skipped.
    #[must_use]
    pub fn try_from_env() -> Option<Self> {
        let base_url = std::env::var("NEXUS_API_BASE_URL").ok()?;
        let config = ClientConfig {
            api_base_url: base_url.clone(),
            ..ClientConfig::default()
        };
        Some(Self {
            client: ApiClient::new(&config),
            base_url,
        })
    }
}
