//! Canonical entity shapes.
//!
//! These are the shapes the client and CLI program against. The backend
//! emits heterogeneous field names (Spanish and English variants); the
//! client's normalization layer translates those into these types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::{CategoryId, ImageId, OrderId, ProductId, UserId};
use crate::types::status::{OrderStatus, UserRole};

/// A product image resolved to a fetchable URL.
///
/// `id` is zero when the backend supplied a literal URL with no image id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: ImageId,
    pub url: String,
}

/// A catalog product in canonical shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category_id: Option<CategoryId>,
    pub stock: i64,
    pub images: Vec<ProductImage>,
    pub created_at: DateTime<Utc>,
}

/// One line of the cart: a product and how many of it.
///
/// The cart holds at most one entry per product id; adding the same
/// product again collapses into this entry's quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Minimal session projection of a backend user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

/// A product category. Categories form a tree via `parent_id`; the
/// `children` field is populated only by the tree endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub parent_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Category>>,
}

/// One line of an order as the backend reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: Decimal,
}

/// An order, read-mostly from the client's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub status: OrderStatus,
    pub total: Decimal,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
}

/// Aggregate order statistics for the back-office dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub total_revenue: Decimal,
    pub total_orders: u64,
    pub total_products: u64,
    pub pending_orders: u64,
    #[serde(default)]
    pub recent_orders: Vec<Order>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: i64, price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("product-{id}"),
            description: String::new(),
            price,
            category_id: None,
            stock: 10,
            images: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_line_total() {
        let item = CartItem {
            product: product(1, Decimal::new(1999, 2)),
            quantity: 3,
        };
        assert_eq!(item.line_total(), Decimal::new(5997, 2));
    }

    #[test]
    fn test_category_children_omitted_when_flat() {
        let category = Category {
            id: CategoryId::new(1),
            name: "Electronics".to_string(),
            parent_id: None,
            children: None,
        };
        let json = serde_json::to_value(&category).unwrap();
        assert!(json.get("children").is_none());
    }

    #[test]
    fn test_order_status_field_wire_shape() {
        let json = serde_json::json!({
            "id": 9,
            "user_id": 2,
            "status": "processing",
            "total": "49.98",
            "items": [{"product_id": 1, "quantity": 2, "price": "24.99"}],
            "created_at": "2026-01-15T10:00:00Z"
        });
        let order: Order = serde_json::from_value(json).unwrap();
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.total, Decimal::new(4998, 2));
    }
}
