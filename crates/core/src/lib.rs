//! NexusShop Core - Shared types library.
//!
//! This crate provides common types used across all NexusShop components:
//! - `client` - API client, response normalization, and the cart/session store
//! - `cli` - Command-line storefront tools
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, canonical entities, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
