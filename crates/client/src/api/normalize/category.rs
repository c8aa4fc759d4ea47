//! Category record normalization, flat and tree shapes.

use nexus_shop_core::{Category, CategoryId};
use serde_json::Value;

use super::value::{int_field, pick, str_field};

/// Keys a tree node may carry its children under.
const CHILDREN_KEYS: &[&str] = &["children", "subcategories", "children_tree"];

/// Normalize a flat category record.
///
/// Returns `None` when the record carries no usable identity field.
#[must_use]
pub fn normalize_category(record: &Value) -> Option<Category> {
    let id = int_field(record, &["idCategoria", "id", "idCategory"])?;
    Some(Category {
        id: CategoryId::new(id),
        name: str_field(record, &["nombre", "name"])
            .unwrap_or_default()
            .to_string(),
        parent_id: int_field(record, &["parent_id", "parentId", "idPadre"]).map(CategoryId::new),
        children: None,
    })
}

/// Normalize a category tree node, recursing into children.
///
/// Children may arrive under `children`, `subcategories`, or
/// `children_tree`; unusable child records are dropped. A node without any
/// children array keeps `children: None` so flat and tree shapes stay
/// distinguishable.
#[must_use]
pub fn normalize_category_node(record: &Value) -> Option<Category> {
    let mut category = normalize_category(record)?;

    category.children = pick(record, CHILDREN_KEYS)
        .and_then(Value::as_array)
        .map(|nodes| nodes.iter().filter_map(normalize_category_node).collect());

    Some(category)
}
