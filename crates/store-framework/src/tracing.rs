//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging for everything built
//! on this crate.
//!
//! ## What Gets Traced
//!
//! - **Store lifecycle**: startup and shutdown with the final revision number
//! - **Dispatches**: every action at `debug`, with whether the snapshot changed
//! - **Subscriptions**: listeners added and removed
//! - **Effects**: scheduled, fired, cancelled, failed
//! - **Selectors**: cache hits and recomputations at `trace`
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run            # lifecycle only
//! RUST_LOG=debug cargo run           # every action with its payload
//! RUST_LOG=store_framework=trace cargo run   # selector cache traffic too
//! ```
//!
//! With `RUST_LOG=debug` a typical add-to-cart looks like:
//!
//! ```text
//! DEBUG dispatch: Dispatch state_type="AppState" action=AddToCart(Product { .. })
//! DEBUG dispatch: State changed state_type="AppState" revision=4 listeners=1
//! ```

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // state_type / effect fields say where a line came from
        .compact()
        .try_init();
}
