//! Local cart commands.
//!
//! The cart lives in the persisted store file, not on the backend. Stock
//! checks happen here at the call site; the reducer itself stores whatever
//! quantity it is told.

use nexus_shop_client::store::StoreAction;
use nexus_shop_core::ProductId;
use tracing::info;

use super::{CommandError, Context};

/// Add `quantity` units of a product to the cart.
///
/// Fetches the product first and refuses quantities beyond current stock,
/// mirroring what the storefront UI enforces at its controls.
pub async fn add(ctx: &Context, id: ProductId, quantity: u32) -> Result<(), CommandError> {
    if quantity == 0 {
        return Err(CommandError::Invalid("quantity must be at least 1".into()));
    }

    let product = ctx.client.get_product(id).await?;
    let mut store = ctx.open_store();

    let already = store
        .state()
        .cart
        .iter()
        .find(|item| item.product.id == id)
        .map_or(0, |item| item.quantity);
    let wanted = already + quantity;
    if i64::from(wanted) > product.stock {
        return Err(CommandError::Invalid(format!(
            "only {} in stock for {} (cart already holds {})",
            product.stock, product.name, already
        )));
    }

    let name = product.name.clone();
    for _ in 0..quantity {
        store.dispatch(StoreAction::AddToCart(product.clone()));
    }

    info!("Added {quantity} x {name}; cart now holds {} items", store.cart_count());
    Ok(())
}

/// Remove a product's line from the cart.
pub fn remove(ctx: &Context, id: ProductId) -> Result<(), CommandError> {
    let mut store = ctx.open_store();
    store.dispatch(StoreAction::RemoveFromCart(id));
    info!("Removed product {id}; cart now holds {} items", store.cart_count());
    Ok(())
}

/// Set a line's quantity exactly; zero removes it.
pub fn set_quantity(ctx: &Context, id: ProductId, quantity: u32) -> Result<(), CommandError> {
    let mut store = ctx.open_store();
    store.dispatch(StoreAction::UpdateQuantity {
        product_id: id,
        quantity,
    });
    info!("Cart now holds {} items", store.cart_count());
    Ok(())
}

/// Print the cart contents and totals.
pub fn show(ctx: &Context) -> Result<(), CommandError> {
    let store = ctx.open_store();
    let state = store.state();

    if state.cart.is_empty() {
        info!("Cart is empty");
        return Ok(());
    }

    for item in &state.cart {
        info!(
            "  {} x #{} {} @ {} = {}",
            item.quantity,
            item.product.id,
            item.product.name,
            item.product.price,
            item.line_total()
        );
    }
    info!("{} items, total {}", store.cart_count(), store.cart_total());
    Ok(())
}

/// Empty the cart.
pub fn clear(ctx: &Context) -> Result<(), CommandError> {
    let mut store = ctx.open_store();
    store.dispatch(StoreAction::ClearCart);
    info!("Cart cleared");
    Ok(())
}
