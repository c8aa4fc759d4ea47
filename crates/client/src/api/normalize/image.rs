//! Image reference normalization.
//!
//! The backend encodes a product image three ways: a bare numeric id, a
//! numeric string, or an object carrying an id (or a literal URL) under one
//! of several possible keys. All id-bearing encodings resolve to the same
//! constructed `/images/{id}` URL.

use nexus_shop_core::{ImageId, ProductImage};
use serde_json::Value;

use super::value::coerce_int;
use crate::api::url::build_url;

/// Keys an image object may carry its id under, in preference order.
const ID_KEYS: &[&str] = &["idImagen", "idImagenProducto", "id", "idImage"];

/// Keys an image object may carry a literal URL under, in preference order.
const URL_KEYS: &[&str] = &["url", "originalUrl", "path"];

/// A classified image reference.
///
/// Classification is exhaustive: every input lands in exactly one variant,
/// with [`ImageRef::Unrecognized`] as the explicit reject outcome rather
/// than a silent skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// A numeric image id: bare number, numeric string, or object with an
    /// id field. Resolves to the images endpoint.
    Id(i64),
    /// An object carrying a literal URL and no usable id. Passed through
    /// as-is.
    Url(String),
    /// None of the known encodings.
    Unrecognized,
}

impl ImageRef {
    /// Classify a raw image value into one of the known encodings.
    #[must_use]
    pub fn classify(value: &Value) -> Self {
        match value {
            Value::Number(_) => coerce_int(value).map_or(Self::Unrecognized, Self::Id),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map_or(Self::Unrecognized, Self::Id),
            Value::Object(map) => {
                if let Some(id) = ID_KEYS
                    .iter()
                    .filter_map(|key| map.get(*key))
                    .find_map(coerce_int)
                {
                    return Self::Id(id);
                }
                URL_KEYS
                    .iter()
                    .filter_map(|key| map.get(*key))
                    .find_map(Value::as_str)
                    .map_or(Self::Unrecognized, |url| Self::Url(url.to_string()))
            }
            Value::Null | Value::Bool(_) | Value::Array(_) => Self::Unrecognized,
        }
    }

    /// Resolve the reference to a fetchable image, or `None` when
    /// unrecognized.
    ///
    /// Id references get a URL constructed against the images endpoint;
    /// literal URLs are used as-is with a zero id.
    #[must_use]
    pub fn resolve(&self, base_url: &str) -> Option<ProductImage> {
        match self {
            Self::Id(id) => Some(ProductImage {
                id: ImageId::new(*id),
                url: build_url(base_url, &format!("/images/{id}")),
            }),
            Self::Url(url) => Some(ProductImage {
                id: ImageId::new(0),
                url: url.clone(),
            }),
            Self::Unrecognized => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    const BASE: &str = "http://host/api";

    #[test]
    fn test_three_encodings_resolve_identically() {
        let expected = ProductImage {
            id: ImageId::new(5),
            url: "http://host/api/images/5".to_string(),
        };

        for raw in [json!(5), json!("5"), json!({"idImagen": 5})] {
            let resolved = ImageRef::classify(&raw).resolve(BASE);
            assert_eq!(resolved.as_ref(), Some(&expected), "input: {raw}");
        }
    }

    #[test]
    fn test_object_id_key_preference() {
        let raw = json!({"idImagenProducto": "9"});
        assert_eq!(ImageRef::classify(&raw), ImageRef::Id(9));

        let raw = json!({"idImage": 3});
        assert_eq!(ImageRef::classify(&raw), ImageRef::Id(3));
    }

    #[test]
    fn test_object_url_fallback() {
        let raw = json!({"url": "https://cdn.example.com/p.jpg"});
        let resolved = ImageRef::classify(&raw).resolve(BASE).unwrap();
        assert_eq!(resolved.id, ImageId::new(0));
        assert_eq!(resolved.url, "https://cdn.example.com/p.jpg");

        // Relative backend paths pass through untouched
        let raw = json!({"path": "../../data/imgs/imagen2.jpg"});
        let resolved = ImageRef::classify(&raw).resolve(BASE).unwrap();
        assert_eq!(resolved.url, "../../data/imgs/imagen2.jpg");
    }

    #[test]
    fn test_id_wins_over_url() {
        let raw = json!({"idImagen": 5, "url": "https://cdn.example.com/p.jpg"});
        assert_eq!(ImageRef::classify(&raw), ImageRef::Id(5));
    }

    #[test]
    fn test_unrecognized_inputs() {
        for raw in [
            json!(null),
            json!(true),
            json!([1, 2]),
            json!("not-a-number"),
            json!({"alt": "no id or url here"}),
        ] {
            assert_eq!(ImageRef::classify(&raw), ImageRef::Unrecognized, "input: {raw}");
            assert_eq!(ImageRef::classify(&raw).resolve(BASE), None);
        }
    }
}
