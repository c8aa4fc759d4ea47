//! NexusShop client core: REST API client, response normalization, and the
//! cart/session store.
//!
//! # Architecture
//!
//! - [`api`] - Async REST client over `reqwest`. Builds URLs against a
//!   configurable base, attaches the bearer token when present, and
//!   normalizes the backend's heterogeneous payload shapes (Spanish and
//!   English field names, three image encodings) into the canonical
//!   entities from `nexus-shop-core`.
//! - [`store`] - The single piece of client-side application state: cart
//!   lines, the authenticated user, and the category cache. Mutation is
//!   message passing (action in, new state out) through a pure reducer,
//!   with every transition mirrored to a persistence sink that can never
//!   fail the transition itself.
//! - [`config`] - Environment-driven configuration.
//!
//! # Concurrency
//!
//! The client is single-writer, request/response only: no retries, no
//! timeouts, no deduplication of in-flight requests. Callers that refetch
//! while an earlier request is still in flight get whatever order the
//! responses arrive in.
//!
//! # Example
//!
//! ```rust,ignore
//! use nexus_shop_client::api::ApiClient;
//! use nexus_shop_client::config::ClientConfig;
//! use nexus_shop_client::store::{Store, StoreAction};
//!
//! let config = ClientConfig::from_env()?;
//! let client = ApiClient::new(&config);
//!
//! let page = client.list_products(&Default::default()).await?;
//! let mut store = Store::new();
//! if let Some(product) = page.products.into_iter().next() {
//!     store.dispatch(StoreAction::AddToCart(product));
//! }
//! println!("{} items, {} total", store.cart_count(), store.cart_total());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod store;

pub use api::{ApiClient, ApiError};
pub use config::{ClientConfig, ConfigError};
pub use store::{Store, StoreAction, StoreState};
