//! # Store Framework
//!
//! Building blocks for a predictable-state container in the Redux/Elm style, running on
//! Tokio: one task owns the state tree, every change arrives as an action, and derived
//! data is computed by memoized selectors instead of being stored.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into layers:
//!
//! 1. **State Layer** ([`StoreState`]) - your state tree and its pure reducer
//! 2. **Runtime Layer** ([`StoreActor`]) - sequential request processing and listener fan-out
//! 3. **Interface Layer** ([`StoreClient`]) - cloneable, type-safe dispatch/read/subscribe
//! 4. **Derived Layer** ([`selector`]) - single-slot memoized selectors
//! 5. **Effect Layer** ([`effect`]) - cancellable timed tasks that feed actions back in
//!
//! ## Snapshot Identity
//!
//! Each successful mutation installs a new `Arc<S>`; a no-op keeps the old one. That
//! gives readers a cheap "did anything change?" test and lets selectors key their
//! caches on the identity of the slice they read.
//!
//! ## Concurrency Model
//!
//! - The store runs in its own Tokio task and handles one request at a time
//! - Snapshots are immutable, so readers never see a half-applied action
//! - Effects run in their own tasks and only talk to the store through a client
//!
//! ## Quick Start
//!
//! ```rust
//! use store_framework::{StoreActor, StoreState};
//!
//! #[derive(Clone, Debug, Default)]
//! struct Todo { items: Vec<String> }
//!
//! #[derive(Debug)]
//! enum TodoAction { Add(String), Clear }
//!
//! impl StoreState for Todo {
//!     type Action = TodoAction;
//!
//!     fn reduce(&self, action: TodoAction) -> Option<Self> {
//!         match action {
//!             TodoAction::Add(item) => {
//!                 let mut items = self.items.clone();
//!                 items.push(item);
//!                 Some(Self { items })
//!             }
//!             TodoAction::Clear if self.items.is_empty() => None,
//!             TodoAction::Clear => Some(Self::default()),
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = StoreActor::new(Todo::default(), 16);
//!     tokio::spawn(actor.run());
//!
//!     client.dispatch(TodoAction::Add("milk".into())).await.unwrap();
//!     let snapshot = client.get_state().await.unwrap();
//!     assert_eq!(snapshot.items, vec!["milk".to_string()]);
//! }
//! ```
//!
//! ## Testing
//!
//! See the [`mock`] module for a stand-in store that records dispatched actions.

pub mod actor;
pub mod client;
pub mod effect;
pub mod error;
pub mod message;
pub mod mock;
pub mod selector;
pub mod state;
pub mod tracing;

// Re-export core types for convenience
pub use actor::StoreActor;
pub use client::{StoreClient, Subscription};
pub use effect::{schedule, Effect, TaskHandle};
pub use error::{EffectError, StoreError};
pub use message::{Listener, Response, StoreRequest, SubscriptionId};
pub use selector::{ByValue, MemoKey, Memoized, Selector};
pub use state::StoreState;
