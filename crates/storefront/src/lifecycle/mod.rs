//! Process-level wiring: building the store, starting the loaders, tearing down.

pub mod storefront_system;

pub use storefront_system::{StorefrontSystem, SystemError};
