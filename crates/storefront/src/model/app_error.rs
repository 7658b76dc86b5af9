//! Application errors kept in the state tree.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An error surfaced to observers through the `error` field of the state.
///
/// These are values, not failures of the store: they travel through
/// [`AppAction::SetError`](crate::actions::AppAction::SetError) like any other data.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppError {
    /// The simulated checkout did not go through.
    #[error("Checkout failed: {0}")]
    CheckoutFailed(String),

    /// The catalog could not be loaded.
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("{0}")]
    Other(String),
}
