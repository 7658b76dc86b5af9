//! # Storefront
//!
//! The state core of a small electronics storefront: a catalog with search, filter and
//! sort, a cart with quantities, and a simulated checkout, all driven through one
//! [`store_framework`] store.
//!
//! ## Core Components
//!
//! - **[model]**: plain data ([`Product`](model::Product), [`CartLine`](model::CartLine),
//!   [`User`](model::User), [`AppError`](model::AppError))
//! - **[actions]**: the closed set of [`AppAction`](actions::AppAction)s and the helpers
//!   that validate them
//! - **[state]**: [`AppState`](state::AppState) and its reducer
//! - **[selectors]**: memoized cart totals and catalog view, plus plain accessors
//! - **[catalog]**: the search/category/sort query behind the catalog view
//! - **[effects]**: catalog loader, session loader, checkout
//! - **[lifecycle]**: [`StorefrontSystem`](lifecycle::StorefrontSystem), which wires it
//!   all together
//!
//! ## Quick Start
//!
//! The demo binary in `main.rs` starts the system, waits for the catalog, fills a cart,
//! logs the derived totals and checks out. Run it with `RUST_LOG=info`.

pub mod actions;
pub mod catalog;
pub mod config;
pub mod effects;
pub mod fixtures;
pub mod lifecycle;
pub mod model;
pub mod selectors;
pub mod state;
