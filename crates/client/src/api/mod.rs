//! NexusShop REST API client.
//!
//! # Architecture
//!
//! - The backend is the source of truth for pricing, inventory, order
//!   lifecycle, search, and authentication; this client only fetches and
//!   reshapes.
//! - Payload shapes are normalized in [`normalize`]: the backend mixes
//!   Spanish and English field names and encodes image references three
//!   different ways.
//! - Requests are fire-once: no retry, no timeout, no in-flight
//!   deduplication.
//!
//! # Example
//!
//! ```rust,ignore
//! use nexus_shop_client::api::{ApiClient, ProductListParams};
//! use nexus_shop_client::config::ClientConfig;
//!
//! let client = ApiClient::new(&ClientConfig::from_env()?);
//!
//! let page = client.list_products(&ProductListParams::default()).await?;
//! let product = client.get_product(page.products[0].id).await?;
//!
//! let session = client.login("user@example.com", "password").await?;
//! assert!(client.has_auth_token());
//! ```

mod auth;
mod catalog;
mod images;
pub mod normalize;
mod orders;
mod rag;
mod url;
mod users;

pub use auth::AuthSession;
pub use catalog::{ProductInput, ProductListParams, ProductPage};
pub use orders::{NewOrder, NewOrderItem, OrderListParams};
pub use rag::{RagAnswer, RagFilters, RagSource, SimilarImage};
pub use users::{PasswordChange, UserUpdate};

use std::sync::{Arc, RwLock};

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::ClientConfig;

/// Errors that can occur when talking to the NexusShop backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (connection refused, DNS, broken pipe).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response, with the best-effort message from the error body.
    #[error("API error {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the JSON error body, or a generic fallback.
        message: String,
    },

    /// Response body was not the JSON we expected.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The backend record was unusable (missing identity field).
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Shape of a backend JSON error body. Only `message` is looked at.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Client for the NexusShop REST backend.
///
/// Cheaply cloneable; the underlying HTTP client and bearer token are
/// shared. The token is updated in place by [`ApiClient::login`] and
/// cleared by [`ApiClient::clear_auth_token`].
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<SecretString>>,
}

impl ApiClient {
    /// Create a new API client.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                http: reqwest::Client::new(),
                base_url: config.api_base_url.clone(),
                token: RwLock::new(config.auth_token.clone()),
            }),
        }
    }

    /// Replace the bearer token attached to outgoing requests.
    pub fn set_auth_token(&self, token: SecretString) {
        if let Ok(mut guard) = self.inner.token.write() {
            *guard = Some(token);
        }
    }

    /// Drop the bearer token; subsequent requests go out unauthenticated.
    pub fn clear_auth_token(&self) {
        if let Ok(mut guard) = self.inner.token.write() {
            *guard = None;
        }
    }

    /// Whether a bearer token is currently attached.
    #[must_use]
    pub fn has_auth_token(&self) -> bool {
        self.inner
            .token
            .read()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    /// Build the full URL for an endpoint path, collapsing a duplicated
    /// path prefix between the configured base and the requested path.
    pub(crate) fn url(&self, path: &str) -> String {
        url::build_url(&self.inner.base_url, path)
    }

    fn bearer(&self) -> Option<String> {
        self.inner
            .token
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|t| t.expose_secret().to_string()))
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.inner.http.request(method, self.url(path));
        if let Some(token) = self.bearer() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Send a request and decode the JSON body.
    ///
    /// Non-2xx responses become [`ApiError::Status`] carrying the message
    /// from the JSON error body when one can be extracted.
    pub(crate) async fn send(&self, builder: reqwest::RequestBuilder) -> Result<Value, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| format!("Error {}", status.as_u16()));
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    pub(crate) async fn get_json(
        &self,
        path: &str,
        params: &[(&str, Option<String>)],
    ) -> Result<Value, ApiError> {
        let mut builder = self.request(reqwest::Method::GET, path);
        let present: Vec<(&str, &String)> = params
            .iter()
            .filter_map(|(key, value)| value.as_ref().map(|v| (*key, v)))
            .collect();
        if !present.is_empty() {
            builder = builder.query(&present);
        }
        self.send(builder).await
    }

    pub(crate) async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.send(self.request(reqwest::Method::POST, path).json(body))
            .await
    }

    pub(crate) async fn put_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.send(self.request(reqwest::Method::PUT, path).json(body))
            .await
    }

    pub(crate) async fn delete_json(&self, path: &str) -> Result<Value, ApiError> {
        self.send(self.request(reqwest::Method::DELETE, path)).await
    }

    pub(crate) async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<Value, ApiError> {
        self.send(self.request(reqwest::Method::POST, path).multipart(form))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(&ClientConfig {
            api_base_url: base.to_string(),
            ..ClientConfig::default()
        })
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Status {
            status: 404,
            message: "product not found".to_string(),
        };
        assert_eq!(err.to_string(), "API error 404: product not found");
    }

    #[test]
    fn test_error_body_message_extraction() {
        let body: ErrorBody = serde_json::from_str(r#"{"message":"bad input"}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("bad input"));

        let body: ErrorBody = serde_json::from_str(r#"{"status":"error"}"#).unwrap();
        assert!(body.message.is_none());
    }

    #[test]
    fn test_token_lifecycle() {
        let client = client("http://host/api");
        assert!(!client.has_auth_token());

        client.set_auth_token(SecretString::from("token-123"));
        assert!(client.has_auth_token());
        assert_eq!(client.bearer().as_deref(), Some("token-123"));

        client.clear_auth_token();
        assert!(!client.has_auth_token());
        assert!(client.bearer().is_none());
    }

    #[test]
    fn test_url_uses_configured_base() {
        let client = client("http://host/api");
        assert_eq!(client.url("/products"), "http://host/api/products");
        // Base and path both carrying /api collapses to a single prefix
        assert_eq!(client.url("/api/products"), "http://host/api/products");
    }
}
