//! # Storefront State
//!
//! The single state tree and the reducer that drives it.
//!
//! `products` and `cart` sit behind `Arc`s. A rule that touches one of them builds a
//! fresh vector; every other rule clones the `Arc`, which keeps the slice's identity.
//! Memoized selectors rely on that: "same `Arc`" means "same contents".

use crate::actions::AppAction;
use crate::model::{AppError, CartLine, Product, ProductId, User};
use std::num::NonZeroU32;
use std::sync::Arc;
use store_framework::StoreState;

/// The whole storefront state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub products: Arc<Vec<Product>>,
    pub cart: Arc<Vec<CartLine>>,
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<AppError>,
}

impl AppState {
    pub fn cart_line(&self, id: ProductId) -> Option<&CartLine> {
        self.cart.iter().find(|line| line.id() == id)
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    fn with_cart(&self, cart: Vec<CartLine>) -> Self {
        Self {
            cart: Arc::new(cart),
            ..self.clone()
        }
    }

    /// `None` once the line is already at `u32::MAX`.
    fn add_to_cart(&self, product: Product) -> Option<Self> {
        let mut cart = self.cart.as_ref().clone();
        match cart.iter_mut().find(|line| line.id() == product.id) {
            Some(line) => line.quantity = line.quantity.checked_add(1)?,
            None => cart.push(CartLine::new(product)),
        }
        Some(self.with_cart(cart))
    }

    fn remove_from_cart(&self, id: ProductId) -> Option<Self> {
        self.cart_line(id)?;
        let cart = self.cart.iter().filter(|line| line.id() != id).cloned().collect();
        Some(self.with_cart(cart))
    }

    fn update_quantity(&self, id: ProductId, quantity: NonZeroU32) -> Option<Self> {
        let index = self.cart.iter().position(|line| line.id() == id)?;
        if self.cart[index].quantity == quantity.get() {
            return None;
        }
        let mut cart = self.cart.as_ref().clone();
        cart[index].quantity = quantity.get();
        Some(self.with_cart(cart))
    }
}

impl StoreState for AppState {
    type Action = AppAction;

    /// Applies one storefront action.
    ///
    /// Returns `None` for no-ops: removing or updating a line that is not in the cart,
    /// adding to a line already at the maximum quantity, clearing an empty cart, and
    /// setting a field to the value it already has.
    fn reduce(&self, action: AppAction) -> Option<Self> {
        match action {
            AppAction::SetProducts(products) => Some(Self {
                products: Arc::new(products),
                ..self.clone()
            }),
            AppAction::AddToCart(product) => self.add_to_cart(product),
            AppAction::RemoveFromCart(id) => self.remove_from_cart(id),
            AppAction::UpdateQuantity { id, quantity } => self.update_quantity(id, quantity),
            AppAction::ClearCart if self.cart.is_empty() => None,
            AppAction::ClearCart => Some(self.with_cart(Vec::new())),
            AppAction::SetUser(user) if self.user.as_ref() == Some(&user) => None,
            AppAction::SetUser(user) => Some(Self {
                user: Some(user),
                ..self.clone()
            }),
            AppAction::SetLoading(loading) if self.loading == loading => None,
            AppAction::SetLoading(loading) => Some(Self {
                loading,
                ..self.clone()
            }),
            AppAction::SetError(error) if self.error == error => None,
            AppAction::SetError(error) => Some(Self {
                error,
                ..self.clone()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    fn product(id: u32, price: f64) -> Product {
        Product::new(id, format!("Item {id}"), price, Category::Laptops)
    }

    /// Applies `action`, treating "unchanged" as "same state".
    fn apply(state: &AppState, action: AppAction) -> AppState {
        state.reduce(action).unwrap_or_else(|| state.clone())
    }

    fn quantities(state: &AppState) -> Vec<(u32, u32)> {
        state.cart.iter().map(|l| (l.id().0, l.quantity)).collect()
    }

    #[test]
    fn test_initial_state_is_empty() {
        let state = AppState::default();
        assert!(state.products.is_empty());
        assert!(state.cart.is_empty());
        assert!(state.user.is_none());
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_set_products_replaces_catalog() {
        let state = apply(&AppState::default(), AppAction::SetProducts(vec![product(1, 1.0)]));
        let state = apply(&state, AppAction::SetProducts(vec![product(2, 2.0), product(3, 3.0)]));
        let ids: Vec<u32> = state.products.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![2, 3]);

        let state = apply(&state, AppAction::SetProducts(vec![]));
        assert!(state.products.is_empty());
    }

    #[test]
    fn test_repeated_add_keeps_one_line() {
        let p = product(1, 10.0);
        let mut state = AppState::default();
        for _ in 0..5 {
            state = apply(&state, AppAction::AddToCart(p.clone()));
        }
        assert_eq!(quantities(&state), vec![(1, 5)]);
    }

    #[test]
    fn test_add_at_max_quantity_is_noop() {
        let p = product(1, 10.0);
        let state = apply(&AppState::default(), AppAction::AddToCart(p.clone()));
        let full = state
            .reduce(AppAction::UpdateQuantity {
                id: ProductId(1),
                quantity: NonZeroU32::MAX,
            })
            .unwrap();

        assert!(full.reduce(AppAction::AddToCart(p)).is_none());
        assert_eq!(quantities(&full), vec![(1, u32::MAX)]);
    }

    #[test]
    fn test_add_appends_in_order_and_snapshots_product() {
        let mut state = AppState::default();
        state = apply(&state, AppAction::AddToCart(product(2, 20.0)));
        state = apply(&state, AppAction::AddToCart(product(1, 10.0)));
        assert_eq!(quantities(&state), vec![(2, 1), (1, 1)]);

        // A later catalog price change does not reach existing lines.
        state = apply(&state, AppAction::SetProducts(vec![product(1, 999.0)]));
        assert_eq!(state.cart_line(ProductId(1)).unwrap().product.price, 10.0);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let state = apply(&AppState::default(), AppAction::AddToCart(product(1, 1.0)));
        let removed = state.reduce(AppAction::RemoveFromCart(ProductId(1))).unwrap();
        assert!(removed.cart.is_empty());
        assert!(removed.reduce(AppAction::RemoveFromCart(ProductId(1))).is_none());
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let state = apply(&AppState::default(), AppAction::AddToCart(product(1, 1.0)));
        assert!(state.reduce(AppAction::RemoveFromCart(ProductId(42))).is_none());
    }

    #[test]
    fn test_update_quantity() {
        let three = NonZeroU32::new(3).unwrap();
        let state = apply(&AppState::default(), AppAction::AddToCart(product(1, 1.0)));

        let updated = state
            .reduce(AppAction::UpdateQuantity { id: ProductId(1), quantity: three })
            .unwrap();
        assert_eq!(quantities(&updated), vec![(1, 3)]);

        assert!(updated
            .reduce(AppAction::UpdateQuantity { id: ProductId(1), quantity: three })
            .is_none());
        assert!(updated
            .reduce(AppAction::UpdateQuantity { id: ProductId(2), quantity: three })
            .is_none());
    }

    #[test]
    fn test_clear_cart() {
        let mut state = AppState::default();
        state = apply(&state, AppAction::AddToCart(product(1, 1.0)));
        state = apply(&state, AppAction::AddToCart(product(2, 1.0)));

        let cleared = state.reduce(AppAction::ClearCart).unwrap();
        assert!(cleared.cart.is_empty());
        assert!(cleared.reduce(AppAction::ClearCart).is_none());
    }

    #[test]
    fn test_cart_rules_keep_products_identity() {
        let state = apply(&AppState::default(), AppAction::SetProducts(vec![product(1, 1.0)]));
        let next = apply(&state, AppAction::AddToCart(product(1, 1.0)));
        assert!(Arc::ptr_eq(&state.products, &next.products));
        assert!(!Arc::ptr_eq(&state.cart, &next.cart));

        let flagged = apply(&next, AppAction::SetLoading(true));
        assert!(Arc::ptr_eq(&next.cart, &flagged.cart));
        assert!(Arc::ptr_eq(&next.products, &flagged.products));
    }

    #[test]
    fn test_scalar_fields() {
        let user = User::new(1, "Ivan", "ivan@example.com");
        let state = apply(&AppState::default(), AppAction::SetUser(user.clone()));
        assert_eq!(state.user.as_ref(), Some(&user));
        assert!(state.reduce(AppAction::SetUser(user)).is_none());

        let state = apply(&state, AppAction::SetLoading(true));
        assert!(state.loading);
        assert!(state.reduce(AppAction::SetLoading(true)).is_none());

        let error = AppError::CheckoutFailed("card declined".into());
        let state = apply(&state, AppAction::SetError(Some(error.clone())));
        assert_eq!(state.error, Some(error));
        let state = apply(&state, AppAction::SetError(None));
        assert!(state.error.is_none());
    }
}
