//! # Storefront Actions
//!
//! The closed set of requests that can change the storefront state, and the helpers
//! that build them.
//!
//! Every variant is a plain, well-typed value, so there is no stringly-typed
//! `{type, payload}` to get wrong. The helpers add the checks the type system alone
//! cannot express (no duplicate product ids, no negative prices, no zero quantity)
//! and reject bad input before it ever reaches the store.
//!
//! ```rust
//! use storefront::actions::AppAction;
//! use storefront::model::{Category, Product, ProductId};
//!
//! let phone = Product::new(1, "Phone", 10.0, Category::Phones);
//! let load = AppAction::set_products(vec![phone.clone()]).unwrap();
//! let add = AppAction::add_to_cart(&phone).unwrap();
//!
//! // A quantity of zero or less from a "-" button means "remove the line".
//! assert_eq!(
//!     AppAction::change_quantity(ProductId(1), 0),
//!     AppAction::RemoveFromCart(ProductId(1)),
//! );
//! assert!(AppAction::update_quantity(ProductId(1), 0).is_err());
//! # let _ = (load, add);
//! ```

use crate::model::{AppError, Product, ProductId, User};
use std::collections::HashSet;
use std::num::NonZeroU32;
use thiserror::Error;

/// Requests understood by the storefront reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Replaces the whole catalog.
    SetProducts(Vec<Product>),
    /// Adds one unit of a product, creating its cart line if needed.
    AddToCart(Product),
    /// Drops the cart line for a product, if any.
    RemoveFromCart(ProductId),
    /// Sets the quantity of an existing cart line.
    UpdateQuantity { id: ProductId, quantity: NonZeroU32 },
    ClearCart,
    SetUser(User),
    SetLoading(bool),
    /// Replaces the stored error; `None` clears it.
    SetError(Option<AppError>),
}

/// Reasons an action helper refuses to build an action.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ActionError {
    /// A product price is negative, NaN or infinite.
    #[error("Invalid price for {id}: {price}")]
    InvalidPrice { id: ProductId, price: f64 },

    /// Two products in one catalog share an id.
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(ProductId),

    /// A cart quantity of zero was requested.
    #[error("Quantity must be positive for {0}")]
    ZeroQuantity(ProductId),
}

fn check_price(product: &Product) -> Result<(), ActionError> {
    if product.has_valid_price() {
        Ok(())
    } else {
        Err(ActionError::InvalidPrice {
            id: product.id,
            price: product.price,
        })
    }
}

impl AppAction {
    /// Builds a `SetProducts` after checking ids are unique and prices are valid.
    ///
    /// An empty catalog is fine.
    pub fn set_products(products: Vec<Product>) -> Result<Self, ActionError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            check_price(product)?;
            if !seen.insert(product.id) {
                return Err(ActionError::DuplicateProduct(product.id));
            }
        }
        Ok(Self::SetProducts(products))
    }

    /// The line snapshots `product` as it is right now.
    ///
    /// Refuses a negative, NaN or infinite price, which would poison the cart total.
    pub fn add_to_cart(product: &Product) -> Result<Self, ActionError> {
        check_price(product)?;
        Ok(Self::AddToCart(product.clone()))
    }

    pub fn remove_from_cart(id: ProductId) -> Self {
        Self::RemoveFromCart(id)
    }

    /// Builds an `UpdateQuantity`, refusing zero.
    pub fn update_quantity(id: ProductId, quantity: u32) -> Result<Self, ActionError> {
        let quantity = NonZeroU32::new(quantity).ok_or(ActionError::ZeroQuantity(id))?;
        Ok(Self::UpdateQuantity { id, quantity })
    }

    /// Maps a requested quantity from a quantity control onto the right action.
    ///
    /// Anything at or below zero removes the line. Values above `u32::MAX` saturate.
    pub fn change_quantity(id: ProductId, quantity: i64) -> Self {
        match u32::try_from(quantity) {
            Ok(0) => Self::RemoveFromCart(id),
            Ok(n) => Self::UpdateQuantity {
                id,
                quantity: NonZeroU32::new(n).unwrap_or(NonZeroU32::MIN),
            },
            Err(_) if quantity < 0 => Self::RemoveFromCart(id),
            Err(_) => Self::UpdateQuantity {
                id,
                quantity: NonZeroU32::MAX,
            },
        }
    }

    pub fn clear_cart() -> Self {
        Self::ClearCart
    }

    pub fn set_user(user: User) -> Self {
        Self::SetUser(user)
    }

    pub fn set_loading(loading: bool) -> Self {
        Self::SetLoading(loading)
    }

    pub fn set_error(error: AppError) -> Self {
        Self::SetError(Some(error))
    }

    pub fn clear_error() -> Self {
        Self::SetError(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    fn product(id: u32, price: f64) -> Product {
        Product::new(id, format!("Item {id}"), price, Category::Phones)
    }

    #[test]
    fn test_set_products_accepts_empty_and_valid() {
        assert_eq!(AppAction::set_products(vec![]), Ok(AppAction::SetProducts(vec![])));
        let products = vec![product(1, 0.0), product(2, 19.5)];
        assert_eq!(
            AppAction::set_products(products.clone()),
            Ok(AppAction::SetProducts(products))
        );
    }

    #[test]
    fn test_set_products_rejects_bad_price() {
        let err = AppAction::set_products(vec![product(1, 5.0), product(2, -1.0)]).unwrap_err();
        assert!(matches!(err, ActionError::InvalidPrice { id: ProductId(2), .. }));

        let err = AppAction::set_products(vec![product(3, f64::NAN)]).unwrap_err();
        assert!(matches!(err, ActionError::InvalidPrice { id: ProductId(3), .. }));
    }

    #[test]
    fn test_set_products_rejects_duplicate_ids() {
        let err = AppAction::set_products(vec![product(1, 5.0), product(1, 6.0)]).unwrap_err();
        assert_eq!(err, ActionError::DuplicateProduct(ProductId(1)));
    }

    #[test]
    fn test_update_quantity_rejects_zero() {
        assert_eq!(
            AppAction::update_quantity(ProductId(4), 0),
            Err(ActionError::ZeroQuantity(ProductId(4)))
        );
        assert_eq!(
            AppAction::update_quantity(ProductId(4), 3),
            Ok(AppAction::UpdateQuantity {
                id: ProductId(4),
                quantity: NonZeroU32::new(3).unwrap(),
            })
        );
    }

    #[test]
    fn test_change_quantity_removes_at_or_below_zero() {
        let id = ProductId(9);
        assert_eq!(AppAction::change_quantity(id, 0), AppAction::RemoveFromCart(id));
        assert_eq!(AppAction::change_quantity(id, -3), AppAction::RemoveFromCart(id));
        assert_eq!(
            AppAction::change_quantity(id, 2),
            AppAction::UpdateQuantity {
                id,
                quantity: NonZeroU32::new(2).unwrap(),
            }
        );
        assert_eq!(
            AppAction::change_quantity(id, i64::MAX),
            AppAction::UpdateQuantity {
                id,
                quantity: NonZeroU32::MAX,
            }
        );
    }

    #[test]
    fn test_add_to_cart_snapshots_product() {
        let mut original = product(1, 10.0);
        let action = AppAction::add_to_cart(&original).unwrap();
        original.price = 99.0;
        assert_eq!(action, AppAction::AddToCart(product(1, 10.0)));
    }

    #[test]
    fn test_add_to_cart_rejects_bad_price() {
        let err = AppAction::add_to_cart(&product(1, -10.0)).unwrap_err();
        assert!(matches!(err, ActionError::InvalidPrice { id: ProductId(1), .. }));

        for price in [f64::NAN, f64::INFINITY] {
            assert!(AppAction::add_to_cart(&product(2, price)).is_err());
        }
        assert!(AppAction::add_to_cart(&product(3, 0.0)).is_ok());
    }
}
