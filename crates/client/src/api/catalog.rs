//! Product and category endpoints.

use nexus_shop_core::{Category, CategoryId, Product, ProductId};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::instrument;

use super::normalize::{int_field, normalize_category, normalize_category_node, normalize_product, pick};
use super::{ApiClient, ApiError};

/// Filters for the product list endpoint. Unset fields are left out of the
/// query string entirely.
#[derive(Debug, Clone, Default)]
pub struct ProductListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub category_id: Option<CategoryId>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub available_only: Option<bool>,
    pub search: Option<String>,
}

impl ProductListParams {
    fn query(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("page", self.page.map(|v| v.to_string())),
            ("limit", self.limit.map(|v| v.to_string())),
            ("category_id", self.category_id.map(|v| v.to_string())),
            ("min_price", self.min_price.map(|v| v.to_string())),
            ("max_price", self.max_price.map(|v| v.to_string())),
            ("available_only", self.available_only.map(|v| v.to_string())),
            ("search", self.search.clone()),
        ]
    }
}

/// One page of the product list, with the pagination envelope the backend
/// wraps it in.
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: u64,
    pub page: u32,
    pub pages: u32,
}

/// Payload for creating or updating a product.
#[derive(Debug, Clone, Serialize)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    pub stock: i64,
}

impl ApiClient {
    /// Fetch a page of products.
    ///
    /// The backend wraps the list as `{products, count, page, pages}` (or
    /// `{data}`); records that fail normalization are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or response decoding fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self, params: &ProductListParams) -> Result<ProductPage, ApiError> {
        let body = self.get_json("/products", &params.query()).await?;

        let products: Vec<Product> = pick(&body, &["products", "data"])
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| normalize_product(item, &self.inner.base_url))
                    .collect()
            })
            .unwrap_or_default();

        #[allow(clippy::cast_sign_loss)]
        let envelope_int = |keys: &[&str], fallback: i64| -> u64 {
            int_field(&body, keys).unwrap_or(fallback).max(0) as u64
        };

        let total = envelope_int(&["count", "total"], i64::try_from(products.len()).unwrap_or(0));
        #[allow(clippy::cast_possible_truncation)]
        let page = envelope_int(&["page"], 1) as u32;
        #[allow(clippy::cast_possible_truncation)]
        let pages = envelope_int(&["pages"], 1) as u32;

        Ok(ProductPage {
            products,
            total,
            page,
            pages,
        })
    }

    /// Fetch a single product by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the backend record is unusable,
    /// or another [`ApiError`] if the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        let body = self.get_json(&format!("/products/{id}"), &[]).await?;
        // Backend may wrap as {product, status} or return the record bare
        let raw = body.get("product").unwrap_or(&body);
        normalize_product(raw, &self.inner.base_url)
            .ok_or_else(|| ApiError::NotFound(format!("product {id}")))
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, input))]
    pub async fn create_product(&self, input: &ProductInput) -> Result<Value, ApiError> {
        self.post_json("/products", &serde_json::to_value(input)?)
            .await
    }

    /// Update a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, input), fields(id = %id))]
    pub async fn update_product(
        &self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Value, ApiError> {
        self.put_json(&format!("/products/{id}"), &serde_json::to_value(input)?)
            .await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        self.delete_json(&format!("/products/{id}")).await?;
        Ok(())
    }

    /// Fetch the flat category list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or response decoding fails.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let body = self.get_json("/categories", &[]).await?;
        let items = body
            .get("categories")
            .unwrap_or(&body)
            .as_array()
            .cloned()
            .unwrap_or_default();
        Ok(items.iter().filter_map(normalize_category).collect())
    }

    /// Fetch the category tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or response decoding fails.
    #[instrument(skip(self))]
    pub async fn category_tree(&self) -> Result<Vec<Category>, ApiError> {
        let body = self.get_json("/categories/tree", &[]).await?;
        let nodes = body
            .get("category_tree")
            .unwrap_or(&body)
            .as_array()
            .cloned()
            .unwrap_or_default();
        Ok(nodes.iter().filter_map(normalize_category_node).collect())
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self))]
    pub async fn create_category(
        &self,
        name: &str,
        parent_id: Option<CategoryId>,
    ) -> Result<Value, ApiError> {
        self.post_json("/categories", &category_payload(name, parent_id))
            .await
    }

    /// Update a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn update_category(
        &self,
        id: CategoryId,
        name: &str,
        parent_id: Option<CategoryId>,
    ) -> Result<Value, ApiError> {
        self.put_json(&format!("/categories/{id}"), &category_payload(name, parent_id))
            .await
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), ApiError> {
        self.delete_json(&format!("/categories/{id}")).await?;
        Ok(())
    }
}

fn category_payload(name: &str, parent_id: Option<CategoryId>) -> Value {
    match parent_id {
        Some(parent) => json!({"name": name, "parent_id": parent}),
        None => json!({"name": name}),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_params_query_skips_unset() {
        let params = ProductListParams {
            page: Some(2),
            search: Some("teclado".to_string()),
            ..ProductListParams::default()
        };
        let present: Vec<_> = params
            .query()
            .into_iter()
            .filter(|(_, v)| v.is_some())
            .collect();
        assert_eq!(present.len(), 2);
        assert_eq!(present[0].0, "page");
        assert_eq!(present[1].0, "search");
    }

    #[test]
    fn test_category_payload_shape() {
        let payload = category_payload("Teclados", Some(CategoryId::new(1)));
        assert_eq!(payload, json!({"name": "Teclados", "parent_id": 1}));

        let payload = category_payload("Raíz", None);
        assert_eq!(payload, json!({"name": "Raíz"}));
    }

    #[test]
    fn test_product_input_serialization() {
        let input = ProductInput {
            name: "Teclado".to_string(),
            description: String::new(),
            price: Decimal::new(8999, 2),
            category_id: None,
            stock: 5,
        };
        let value = serde_json::to_value(&input).unwrap();
        assert!(value.get("category_id").is_none());
        assert_eq!(value["stock"], json!(5));
    }
}
