//! Product record normalization.

use chrono::{DateTime, Utc};
use nexus_shop_core::{CategoryId, Product, ProductId};
use rust_decimal::Decimal;
use serde_json::Value;

use super::image::ImageRef;
use super::value::{decimal_field, int_field, pick, str_field};

/// Normalize a raw backend product record into the canonical shape.
///
/// Accepts both the Spanish (`idProducto`, `nombre`, `precio`, ...) and
/// English field names. Returns `None` when the record carries no usable
/// identity field; image entries that classify as unrecognized are dropped
/// from the list.
#[must_use]
pub fn normalize_product(record: &Value, base_url: &str) -> Option<Product> {
    let id = int_field(record, &["idProducto", "id", "_id"])?;

    let name = str_field(record, &["nombre", "name"]).unwrap_or_default();
    let description = str_field(record, &["descripcion", "description"]).unwrap_or_default();
    let price = decimal_field(record, &["precio", "price"]).unwrap_or(Decimal::ZERO);
    let category_id = int_field(record, &["idCategoria", "category_id"]).map(CategoryId::new);
    let stock = int_field(record, &["stock"]).unwrap_or(0);

    let created_at = str_field(record, &["fechaCreacion", "created_at"])
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map_or_else(Utc::now, |dt| dt.with_timezone(&Utc));

    let images = pick(record, &["imagenesProductos", "images"])
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| ImageRef::classify(entry).resolve(base_url))
                .collect()
        })
        .unwrap_or_default();

    Some(Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        price,
        category_id,
        stock,
        images,
        created_at,
    })
}
