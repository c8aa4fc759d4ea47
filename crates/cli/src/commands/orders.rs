//! Order commands.

use nexus_shop_client::api::{NewOrder, NewOrderItem, OrderListParams};
use nexus_shop_client::store::StoreAction;
use nexus_shop_core::{OrderId, OrderStatus};
use tracing::info;

use super::{CommandError, Context};

/// List orders for the logged-in user.
pub async fn list(ctx: &Context, status: Option<OrderStatus>) -> Result<(), CommandError> {
    let store = ctx.open_store();
    let user_id = store.state().user.as_ref().map(|u| u.id);

    let orders = ctx
        .client
        .list_orders(&OrderListParams { user_id, status })
        .await?;

    info!("{} orders", orders.len());
    for order in &orders {
        info!(
            "  #{} {} - {} ({})",
            order.id,
            order.status,
            order.total,
            order.created_at.format("%Y-%m-%d")
        );
    }
    Ok(())
}

/// Show one order in full.
pub async fn show(ctx: &Context, id: OrderId) -> Result<(), CommandError> {
    let order = ctx.client.get_order(id).await?;

    info!("#{} {} - total {}", order.id, order.status, order.total);
    for item in &order.items {
        info!(
            "  {} x product #{} @ {}",
            item.quantity, item.product_id, item.price
        );
    }
    Ok(())
}

/// Show aggregate order statistics (admin).
pub async fn summary(ctx: &Context) -> Result<(), CommandError> {
    let summary = ctx.client.order_summary().await?;

    info!("revenue: {}", summary.total_revenue);
    info!("orders: {} ({} pending)", summary.total_orders, summary.pending_orders);
    info!("products: {}", summary.total_products);
    for order in &summary.recent_orders {
        info!("  recent #{} {} - {}", order.id, order.status, order.total);
    }
    Ok(())
}

/// Place an order from the current cart, then empty it.
pub async fn checkout(ctx: &Context) -> Result<(), CommandError> {
    let mut store = ctx.open_store();
    let state = store.state();

    let user = state
        .user
        .as_ref()
        .ok_or_else(|| CommandError::Invalid("log in before checking out".into()))?;
    if state.cart.is_empty() {
        return Err(CommandError::Invalid("cart is empty".into()));
    }

    let order = NewOrder {
        user_id: user.id,
        items: state
            .cart
            .iter()
            .map(|item| NewOrderItem {
                product_id: item.product.id,
                quantity: item.quantity,
            })
            .collect(),
    };
    let total = store.cart_total();

    ctx.client.create_order(&order).await?;
    store.dispatch(StoreAction::ClearCart);

    info!("Order placed ({} lines, total {total})", order.items.len());
    Ok(())
}

/// Update an order's status (admin).
pub async fn set_status(
    ctx: &Context,
    id: OrderId,
    status: OrderStatus,
) -> Result<(), CommandError> {
    ctx.client.update_order_status(id, status).await?;
    info!("Order {id} is now {status}");
    Ok(())
}
