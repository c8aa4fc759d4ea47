//! The cart/session store.
//!
//! All client-side application state lives in one [`StoreState`] value:
//! cart lines, the authenticated user, and the category cache. Mutation is
//! message passing: an action goes through the pure [`reduce`] function and
//! produces the next state. The [`Store`] wrapper owns the current state
//! and mirrors `{cart, user, isAuthenticated}` to a persistence sink after
//! every dispatch.
//!
//! None of the transitions can fail. Persistence is best-effort: a failed
//! write is logged and dropped, never surfaced to the dispatcher.
//!
//! Quantities are not clamped against product stock here; call sites that
//! take user input are expected to check `product.stock` before
//! dispatching.

pub mod persist;

use nexus_shop_core::{CartItem, Category, Product, ProductId, User};
use rust_decimal::Decimal;
use tracing::warn;

pub use persist::{JsonFilePersister, PersistError, PersistedState, StatePersister, TokenStore};

/// The single piece of client-side application state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    /// Cart lines; at most one entry per product id.
    pub cart: Vec<CartItem>,
    /// The authenticated user, if any.
    pub user: Option<User>,
    /// Whether a user is logged in.
    pub is_authenticated: bool,
    /// Category cache filled by the views that fetch the tree.
    pub categories: Vec<Category>,
}

/// A state transition message.
#[derive(Debug, Clone)]
pub enum StoreAction {
    /// Add one unit of a product: increments an existing line, or appends
    /// a new line with quantity 1.
    AddToCart(Product),
    /// Remove a product's line entirely. No-op when absent.
    RemoveFromCart(ProductId),
    /// Set a line's quantity exactly. Zero removes the line.
    UpdateQuantity {
        product_id: ProductId,
        quantity: u32,
    },
    /// Empty the cart.
    ClearCart,
    /// Set (or clear) the authenticated user; the auth flag follows.
    SetUser(Option<User>),
    /// Clear user, auth flag, and cart together.
    Logout,
    /// Replace the category cache.
    SetCategories(Vec<Category>),
    /// Merge previously persisted state in. Used once on startup.
    Hydrate(PersistedState),
}

/// Pure state transition function.
#[must_use]
pub fn reduce(mut state: StoreState, action: StoreAction) -> StoreState {
    match action {
        StoreAction::AddToCart(product) => {
            if let Some(item) = state.cart.iter_mut().find(|i| i.product.id == product.id) {
                item.quantity = item.quantity.saturating_add(1);
            } else {
                state.cart.push(CartItem {
                    product,
                    quantity: 1,
                });
            }
            state
        }
        StoreAction::RemoveFromCart(product_id) => {
            state.cart.retain(|item| item.product.id != product_id);
            state
        }
        StoreAction::UpdateQuantity {
            product_id,
            quantity,
        } => {
            if quantity == 0 {
                state.cart.retain(|item| item.product.id != product_id);
            } else if let Some(item) =
                state.cart.iter_mut().find(|i| i.product.id == product_id)
            {
                item.quantity = quantity;
            }
            state
        }
        StoreAction::ClearCart => {
            state.cart.clear();
            state
        }
        StoreAction::SetUser(user) => {
            state.is_authenticated = user.is_some();
            state.user = user;
            state
        }
        StoreAction::Logout => {
            state.user = None;
            state.is_authenticated = false;
            state.cart.clear();
            state
        }
        StoreAction::SetCategories(categories) => {
            state.categories = categories;
            state
        }
        StoreAction::Hydrate(persisted) => {
            if let Some(cart) = persisted.cart {
                state.cart = cart;
            }
            if let Some(user) = persisted.user {
                state.user = Some(user);
            }
            if let Some(flag) = persisted.is_authenticated {
                state.is_authenticated = flag;
            }
            state
        }
    }
}

/// Owner of the current state plus the persistence observer.
pub struct Store {
    state: StoreState,
    persister: Option<Box<dyn StatePersister>>,
}

impl Store {
    /// Create a store with default state and no persistence.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: StoreState::default(),
            persister: None,
        }
    }

    /// Create a store backed by a persistence sink, hydrating from it.
    ///
    /// Unreadable or malformed persisted data is discarded silently and
    /// the store starts from defaults.
    #[must_use]
    pub fn with_persister(persister: Box<dyn StatePersister>) -> Self {
        let mut store = Self {
            state: StoreState::default(),
            persister: None,
        };
        if let Ok(Some(persisted)) = persister.load() {
            store.state = reduce(store.state, StoreAction::Hydrate(persisted));
        }
        store.persister = Some(persister);
        store
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &StoreState {
        &self.state
    }

    /// Apply an action and mirror the result to the persistence sink.
    ///
    /// Persistence failures are logged and swallowed; the transition
    /// itself cannot fail.
    pub fn dispatch(&mut self, action: StoreAction) {
        self.state = reduce(std::mem::take(&mut self.state), action);
        if let Some(persister) = &self.persister
            && let Err(e) = persister.save(&PersistedState::snapshot(&self.state))
        {
            warn!(error = %e, "failed to persist store state");
        }
    }

    /// Sum of `price * quantity` over the cart.
    #[must_use]
    pub fn cart_total(&self) -> Decimal {
        self.state.cart.iter().map(CartItem::line_total).sum()
    }

    /// Sum of quantities over the cart.
    #[must_use]
    pub fn cart_count(&self) -> u32 {
        self.state.cart.iter().map(|item| item.quantity).sum()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use nexus_shop_core::{CategoryId, UserId, UserRole};

    fn product(id: i64, price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("product-{id}"),
            description: String::new(),
            price,
            category_id: None,
            stock: 3,
            images: Vec::new(),
            created_at: Utc::now(),
        }
    }

    fn user() -> User {
        User {
            id: UserId::new(1),
            email: "ana@example.com".to_string(),
            name: "Ana".to_string(),
            role: UserRole::User,
        }
    }

    #[test]
    fn test_add_same_product_twice_collapses() {
        let p = product(1, Decimal::from(10));
        let state = reduce(StoreState::default(), StoreAction::AddToCart(p.clone()));
        let state = reduce(state, StoreAction::AddToCart(p));

        assert_eq!(state.cart.len(), 1);
        assert_eq!(state.cart[0].quantity, 2);
    }

    #[test]
    fn test_add_at_max_quantity_saturates() {
        let p = product(1, Decimal::from(10));
        let state = StoreState {
            cart: vec![CartItem {
                product: p.clone(),
                quantity: u32::MAX,
            }],
            ..StoreState::default()
        };
        let state = reduce(state, StoreAction::AddToCart(p));
        assert_eq!(state.cart[0].quantity, u32::MAX);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let state = reduce(
            StoreState::default(),
            StoreAction::AddToCart(product(1, Decimal::from(10))),
        );
        let state = reduce(state, StoreAction::RemoveFromCart(ProductId::new(99)));
        assert_eq!(state.cart.len(), 1);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let state = reduce(
            StoreState::default(),
            StoreAction::AddToCart(product(1, Decimal::from(10))),
        );
        let state = reduce(
            state,
            StoreAction::UpdateQuantity {
                product_id: ProductId::new(1),
                quantity: 0,
            },
        );
        assert!(state.cart.is_empty());
    }

    #[test]
    fn test_update_quantity_sets_exactly_no_stock_clamp() {
        // stock is 3, but the reducer does not clamp
        let state = reduce(
            StoreState::default(),
            StoreAction::AddToCart(product(1, Decimal::from(10))),
        );
        let state = reduce(
            state,
            StoreAction::UpdateQuantity {
                product_id: ProductId::new(1),
                quantity: 50,
            },
        );
        assert_eq!(state.cart[0].quantity, 50);
    }

    #[test]
    fn test_cart_total_and_count() {
        let mut store = Store::new();
        store.dispatch(StoreAction::AddToCart(product(1, Decimal::from(10))));
        store.dispatch(StoreAction::UpdateQuantity {
            product_id: ProductId::new(1),
            quantity: 2,
        });
        store.dispatch(StoreAction::AddToCart(product(2, Decimal::from(5))));
        store.dispatch(StoreAction::UpdateQuantity {
            product_id: ProductId::new(2),
            quantity: 3,
        });

        assert_eq!(store.cart_total(), Decimal::from(35));
        assert_eq!(store.cart_count(), 5);
    }

    #[test]
    fn test_set_user_drives_auth_flag() {
        let state = reduce(StoreState::default(), StoreAction::SetUser(Some(user())));
        assert!(state.is_authenticated);

        let state = reduce(state, StoreAction::SetUser(None));
        assert!(!state.is_authenticated);
        assert!(state.user.is_none());
    }

    #[test]
    fn test_logout_clears_cart_user_and_flag() {
        let state = reduce(StoreState::default(), StoreAction::SetUser(Some(user())));
        let state = reduce(state, StoreAction::AddToCart(product(1, Decimal::from(10))));
        let state = reduce(state, StoreAction::Logout);

        assert!(state.cart.is_empty());
        assert!(state.user.is_none());
        assert!(!state.is_authenticated);
    }

    #[test]
    fn test_clear_cart_keeps_session() {
        let state = reduce(StoreState::default(), StoreAction::SetUser(Some(user())));
        let state = reduce(state, StoreAction::AddToCart(product(1, Decimal::from(10))));
        let state = reduce(state, StoreAction::ClearCart);

        assert!(state.cart.is_empty());
        assert!(state.is_authenticated);
    }

    #[test]
    fn test_set_categories() {
        let categories = vec![Category {
            id: CategoryId::new(1),
            name: "Electronics".to_string(),
            parent_id: None,
            children: None,
        }];
        let state = reduce(
            StoreState::default(),
            StoreAction::SetCategories(categories.clone()),
        );
        assert_eq!(state.categories, categories);
    }

    #[test]
    fn test_hydrate_replaces_persisted_fields_exactly() {
        let cart = vec![CartItem {
            product: product(1, Decimal::from(10)),
            quantity: 2,
        }];
        let persisted = PersistedState {
            cart: Some(cart.clone()),
            user: Some(user()),
            is_authenticated: Some(true),
        };

        let state = reduce(StoreState::default(), StoreAction::Hydrate(persisted));
        assert_eq!(state.cart, cart);
        assert_eq!(state.user, Some(user()));
        assert!(state.is_authenticated);
    }

    #[test]
    fn test_hydrate_partial_keeps_other_fields() {
        let state = reduce(StoreState::default(), StoreAction::SetUser(Some(user())));
        let persisted = PersistedState {
            cart: Some(Vec::new()),
            user: None,
            is_authenticated: None,
        };
        let state = reduce(state, StoreAction::Hydrate(persisted));

        assert_eq!(state.user, Some(user()));
        assert!(state.is_authenticated);
    }
}
