//! Order endpoints.

use nexus_shop_core::{Order, OrderId, OrderStatus, OrderSummary, ProductId, UserId};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::instrument;

use super::{ApiClient, ApiError};

/// Filters for the order list endpoint.
#[derive(Debug, Clone, Default)]
pub struct OrderListParams {
    pub user_id: Option<UserId>,
    pub status: Option<OrderStatus>,
}

/// One line of an order being placed.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Payload for placing an order.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrder {
    pub user_id: UserId,
    pub items: Vec<NewOrderItem>,
}

impl ApiClient {
    /// Fetch orders, optionally filtered by user and status.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or response decoding fails.
    #[instrument(skip(self))]
    pub async fn list_orders(&self, params: &OrderListParams) -> Result<Vec<Order>, ApiError> {
        let query = [
            ("user_id", params.user_id.map(|v| v.to_string())),
            ("status", params.status.map(|v| v.to_string())),
        ];
        let body = self.get_json("/orders", &query).await?;
        let items = body
            .get("orders")
            .unwrap_or(&body)
            .as_array()
            .cloned()
            .unwrap_or_default();
        items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(ApiError::from))
            .collect()
    }

    /// Fetch a single order by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or response decoding fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_order(&self, id: OrderId) -> Result<Order, ApiError> {
        let body = self.get_json(&format!("/orders/{id}"), &[]).await?;
        let raw = body.get("order").unwrap_or(&body);
        Ok(serde_json::from_value(raw.clone())?)
    }

    /// Fetch aggregate order statistics for the back-office dashboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or response decoding fails.
    #[instrument(skip(self))]
    pub async fn order_summary(&self) -> Result<OrderSummary, ApiError> {
        let body = self.get_json("/orders/summary", &[]).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Place an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, order), fields(user_id = %order.user_id))]
    pub async fn create_order(&self, order: &NewOrder) -> Result<Value, ApiError> {
        self.post_json("/orders", &serde_json::to_value(order)?)
            .await
    }

    /// Update an order's status (admin operation).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self), fields(id = %id, status = %status))]
    pub async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Value, ApiError> {
        self.put_json(&format!("/orders/{id}/status"), &json!({"status": status}))
            .await
    }
}
