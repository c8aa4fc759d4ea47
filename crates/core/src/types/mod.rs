//! Core types for NexusShop.
//!
//! This module provides the canonical entity shapes the rest of the
//! workspace programs against, independent of backend field naming.

pub mod email;
pub mod entity;
pub mod id;
pub mod status;

pub use email::{Email, EmailError};
pub use entity::*;
pub use id::*;
pub use status::*;
