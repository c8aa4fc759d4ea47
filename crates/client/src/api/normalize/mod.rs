//! Response-shape normalization.
//!
//! The backend emits inconsistent field names (Spanish and English variants
//! of the same field) and three different encodings for image references.
//! This module translates raw records into the canonical entities from
//! `nexus-shop-core`.
//!
//! The contract per record: produce a canonical entity, or `None` when the
//! record is unusable (missing its identity field). Unusable records are
//! dropped from lists rather than failing the whole response.

mod category;
mod image;
mod product;
mod value;

pub use category::{normalize_category, normalize_category_node};
pub use image::ImageRef;
pub use product::normalize_product;

pub(crate) use value::{int_field, pick};
