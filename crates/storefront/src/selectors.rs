//! # Storefront Selectors
//!
//! Everything derived from [`AppState`] is computed here and never stored in it.
//!
//! The plain accessors (`select_*`) just borrow a field. The derived values live in a
//! [`StoreSelectors`], which owns one single-slot cache per selector. Each cache is
//! keyed on the identity of the slice it reads, so a dispatch that leaves the cart
//! alone (say, `SetLoading`) hands back the cached count and total.
//!
//! ```rust
//! use storefront::actions::AppAction;
//! use storefront::model::{Category, Product};
//! use storefront::selectors::StoreSelectors;
//! use storefront::state::AppState;
//! use store_framework::StoreState;
//!
//! let selectors = StoreSelectors::new();
//! let phone = Product::new(1, "Phone", 10.0, Category::Phones);
//! let state = AppState::default()
//!     .reduce(AppAction::add_to_cart(&phone).unwrap())
//!     .unwrap();
//!
//! assert_eq!(selectors.cart_item_count(&state), 1);
//! assert_eq!(selectors.cart_total_price(&state), 10.0);
//! ```

use crate::catalog::{self, CatalogQuery};
use crate::model::{AppError, CartLine, Product, User};
use crate::state::AppState;
use std::sync::Arc;
use store_framework::{ByValue, Memoized, Selector};

pub fn select_products(state: &AppState) -> &[Product] {
    &state.products
}

pub fn select_cart(state: &AppState) -> &[CartLine] {
    &state.cart
}

pub fn select_user(state: &AppState) -> Option<&User> {
    state.user.as_ref()
}

pub fn select_loading(state: &AppState) -> bool {
    state.loading
}

pub fn select_error(state: &AppState) -> Option<&AppError> {
    state.error.as_ref()
}

fn cart_slice(state: &AppState) -> Arc<Vec<CartLine>> {
    Arc::clone(&state.cart)
}

type CatalogKey = (Arc<Vec<Product>>, ByValue<CatalogQuery>);

/// How often each derived selector has recomputed since creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectorStats {
    pub cart_item_count: usize,
    pub cart_total_price: usize,
    pub visible_products: usize,
}

/// The memoized derived selectors for one store.
#[derive(Debug)]
pub struct StoreSelectors {
    cart_item_count: Selector<AppState, Arc<Vec<CartLine>>, u64>,
    cart_total_price: Selector<AppState, Arc<Vec<CartLine>>, f64>,
    visible_products: Memoized<CatalogKey, Arc<Vec<Product>>>,
}

impl StoreSelectors {
    pub fn new() -> Self {
        let item_count = |cart: &Arc<Vec<CartLine>>| {
            cart.iter().map(|line| u64::from(line.quantity)).sum::<u64>()
        };
        let total_price =
            |cart: &Arc<Vec<CartLine>>| cart.iter().map(CartLine::subtotal).sum::<f64>();
        let visible = |(products, query): &CatalogKey| {
            Arc::new(catalog::visible_products(products, &query.0))
        };

        Self {
            cart_item_count: Selector::new("cart_item_count", cart_slice, item_count),
            cart_total_price: Selector::new("cart_total_price", cart_slice, total_price),
            visible_products: Memoized::new("visible_products", visible),
        }
    }

    /// Total number of units in the cart.
    pub fn cart_item_count(&self, state: &AppState) -> u64 {
        self.cart_item_count.select(state)
    }

    /// Sum of `price * quantity` over the cart.
    pub fn cart_total_price(&self, state: &AppState) -> f64 {
        self.cart_total_price.select(state)
    }

    /// The catalog as seen through `query`.
    ///
    /// Cached on the identity of the catalog and the value of the query.
    pub fn visible_products(&self, state: &AppState, query: &CatalogQuery) -> Arc<Vec<Product>> {
        self.visible_products
            .get((Arc::clone(&state.products), ByValue(query.clone())))
    }

    pub fn stats(&self) -> SelectorStats {
        SelectorStats {
            cart_item_count: self.cart_item_count.recomputations(),
            cart_total_price: self.cart_total_price.recomputations(),
            visible_products: self.visible_products.recomputations(),
        }
    }
}

impl Default for StoreSelectors {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::AppAction;
    use crate::catalog::SortKey;
    use crate::fixtures::mock_catalog;
    use crate::model::{Category, ProductId};
    use store_framework::StoreState;

    fn apply(state: &AppState, action: AppAction) -> AppState {
        state.reduce(action).unwrap_or_else(|| state.clone())
    }

    fn two_products() -> (Product, Product) {
        (
            Product::new(1, "One", 10.0, Category::Phones),
            Product::new(2, "Two", 20.0, Category::Phones),
        )
    }

    #[test]
    fn test_empty_cart_derives_zero() {
        let selectors = StoreSelectors::new();
        let state = AppState::default();
        assert_eq!(selectors.cart_item_count(&state), 0);
        assert_eq!(selectors.cart_total_price(&state), 0.0);
    }

    #[test]
    fn test_cart_scenario() {
        let selectors = StoreSelectors::new();
        let (one, two) = two_products();

        let mut state = apply(
            &AppState::default(),
            AppAction::set_products(vec![one.clone(), two.clone()]).unwrap(),
        );
        state = apply(&state, AppAction::add_to_cart(&one).unwrap());
        state = apply(&state, AppAction::add_to_cart(&one).unwrap());
        state = apply(&state, AppAction::add_to_cart(&two).unwrap());

        let lines: Vec<(ProductId, u32)> = select_cart(&state)
            .iter()
            .map(|l| (l.id(), l.quantity))
            .collect();
        assert_eq!(lines, vec![(ProductId(1), 2), (ProductId(2), 1)]);
        assert_eq!(selectors.cart_item_count(&state), 3);
        assert_eq!(selectors.cart_total_price(&state), 40.0);

        state = apply(&state, AppAction::clear_cart());
        assert!(select_cart(&state).is_empty());
        assert_eq!(selectors.cart_item_count(&state), 0);
        assert_eq!(selectors.cart_total_price(&state), 0.0);
    }

    #[test]
    fn test_same_snapshot_does_not_recompute() {
        let selectors = StoreSelectors::new();
        let (one, _) = two_products();
        let state = apply(&AppState::default(), AppAction::add_to_cart(&one).unwrap());

        selectors.cart_item_count(&state);
        selectors.cart_item_count(&state);
        selectors.cart_total_price(&state);
        selectors.cart_total_price(&state);

        let stats = selectors.stats();
        assert_eq!(stats.cart_item_count, 1);
        assert_eq!(stats.cart_total_price, 1);
    }

    #[test]
    fn test_unrelated_mutation_hits_cache() {
        let selectors = StoreSelectors::new();
        let (one, _) = two_products();
        let state = apply(&AppState::default(), AppAction::add_to_cart(&one).unwrap());
        assert_eq!(selectors.cart_total_price(&state), 10.0);

        let state = apply(&state, AppAction::set_loading(true));
        let state = apply(&state, AppAction::set_user(crate::fixtures::mock_user()));
        assert_eq!(selectors.cart_total_price(&state), 10.0);
        assert_eq!(selectors.stats().cart_total_price, 1);

        let state = apply(&state, AppAction::add_to_cart(&one).unwrap());
        assert_eq!(selectors.cart_total_price(&state), 20.0);
        assert_eq!(selectors.stats().cart_total_price, 2);
    }

    #[test]
    fn test_visible_products_keyed_on_catalog_and_query() {
        let selectors = StoreSelectors::new();
        let state = apply(
            &AppState::default(),
            AppAction::set_products(mock_catalog()).unwrap(),
        );
        let by_price = CatalogQuery::new().sort_by(SortKey::Price);

        let first = selectors.visible_products(&state, &by_price);
        let again = selectors.visible_products(&state, &by_price);
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(first[0].name, "Samsung Galaxy Tab");

        // Cart changes leave the catalog slice alone.
        let state = apply(&state, AppAction::add_to_cart(&first[0]).unwrap());
        selectors.visible_products(&state, &by_price);
        assert_eq!(selectors.stats().visible_products, 1);

        let tablets = by_price.clone().category(Category::Tablets);
        assert_eq!(selectors.visible_products(&state, &tablets).len(), 2);
        assert_eq!(selectors.stats().visible_products, 2);
    }

    #[test]
    fn test_plain_accessors() {
        let state = AppState::default();
        assert!(select_products(&state).is_empty());
        assert!(select_user(&state).is_none());
        assert!(!select_loading(&state));
        assert!(select_error(&state).is_none());
    }
}
