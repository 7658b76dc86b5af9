//! # Storefront Effects
//!
//! Timed work that feeds actions into the store, each one a
//! [`store_framework::Effect`] owned by a [`store_framework::TaskHandle`]:
//!
//! - [`CatalogLoader`]: raises `loading`, then delivers the catalog
//! - [`SessionLoader`]: delivers the signed-in user
//! - [`CheckoutFlow`]: guards and runs a (simulated) checkout

pub mod catalog_loader;
pub mod checkout;
pub mod session_loader;

pub use catalog_loader::CatalogLoader;
pub use checkout::{CheckoutError, CheckoutFlow};
pub use session_loader::SessionLoader;
