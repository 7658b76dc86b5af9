//! # Framework Errors
//!
//! Errors raised by the plumbing around a store: the channel to the store task and
//! the scheduled effects that feed it. Reducers have no error channel, so nothing in
//! here describes a failed mutation.

/// Errors that can occur while talking to a store.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store closed")]
    StoreClosed,
    #[error("Store dropped response channel")]
    StoreDropped,
}

/// Errors reported when joining a scheduled effect.
#[derive(Debug, thiserror::Error)]
pub enum EffectError {
    #[error("Effect '{0}' was cancelled")]
    Cancelled(&'static str),
    #[error("Effect '{name}' panicked: {message}")]
    Panicked { name: &'static str, message: String },
    #[error("Effect '{name}' failed: {source}")]
    Store {
        name: &'static str,
        #[source]
        source: StoreError,
    },
}
