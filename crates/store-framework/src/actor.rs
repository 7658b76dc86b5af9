//! # Store Actor
//!
//! This module defines the `StoreActor`, the task that owns a state tree. It is the
//! "Server" side of the store: it processes requests sequentially, so the snapshot it
//! holds is never observed half-updated and needs no lock.

use crate::client::StoreClient;
use crate::message::{Listener, StoreRequest, SubscriptionId};
use crate::state::StoreState;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The task that owns the canonical state tree.
///
/// # Concurrency Model
/// Every mutation goes through the single receiver, one request at a time. Readers get
/// an `Arc` of the current snapshot; a dispatch that changes anything installs a new
/// `Arc` instead of touching the old one, so a snapshot handed out earlier stays valid
/// and immutable forever.
///
/// # Usage Pattern
///
/// 1.  **Create**: `StoreActor::new(initial, capacity)` returns the actor and a client.
/// 2.  **Run**: spawn `actor.run()` on the runtime.
/// 3.  **Use**: clone the client into whoever needs to dispatch or read.
///
/// ```rust
/// use store_framework::{StoreActor, StoreState};
///
/// #[derive(Clone, Debug, Default)]
/// struct Flag { on: bool }
///
/// #[derive(Debug)]
/// struct Set(bool);
///
/// impl StoreState for Flag {
///     type Action = Set;
///     fn reduce(&self, Set(on): Set) -> Option<Self> {
///         (self.on != on).then_some(Self { on })
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = StoreActor::new(Flag::default(), 8);
///     let handle = tokio::spawn(actor.run());
///
///     assert!(client.dispatch(Set(true)).await.unwrap());
///     assert!(!client.dispatch(Set(true)).await.unwrap());
///     assert!(client.get_state().await.unwrap().on);
///
///     drop(client);
///     let last = handle.await.unwrap();
///     assert!(last.on);
/// }
/// ```
pub struct StoreActor<S: StoreState> {
    receiver: mpsc::Receiver<StoreRequest<S>>,
    state: Arc<S>,
    listeners: Vec<(SubscriptionId, Listener<S>)>,
    next_subscription: u64,
}

impl<S: StoreState> StoreActor<S> {
    /// Creates a new `StoreActor` holding `initial` and its associated `StoreClient`.
    ///
    /// `buffer_size` is the capacity of the request channel. When it is full, client
    /// calls wait for room.
    pub fn new(initial: S, buffer_size: usize) -> (Self, StoreClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            state: Arc::new(initial),
            listeners: Vec::new(),
            next_subscription: 1,
        };
        (actor, StoreClient::new(sender))
    }

    /// Calls every listener with the current snapshot.
    ///
    /// A listener that panics is removed; the store and the other listeners carry on.
    fn notify_listeners(&mut self, state_type: &str) {
        let state = &self.state;
        self.listeners.retain(|(id, listener)| {
            match panic::catch_unwind(AssertUnwindSafe(|| listener(state))) {
                Ok(()) => true,
                Err(_) => {
                    warn!(state_type, %id, "Listener panicked, removing it");
                    false
                }
            }
        });
    }

    /// Runs the store's event loop until every client has been dropped.
    ///
    /// Returns the last snapshot, which is handy for shutdown reporting and tests.
    pub async fn run(mut self) -> Arc<S> {
        // "AppState" instead of "storefront::state::AppState"
        let state_type = std::any::type_name::<S>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(state_type, "Store started");

        let mut revision: u64 = 0;
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Dispatch { action, respond_to } => {
                    debug!(state_type, ?action, "Dispatch");
                    let changed = match self.state.reduce(action) {
                        Some(next) => {
                            self.state = Arc::new(next);
                            revision += 1;
                            self.notify_listeners(state_type);
                            debug!(state_type, revision, listeners = self.listeners.len(), "State changed");
                            true
                        }
                        None => {
                            debug!(state_type, revision, "State unchanged");
                            false
                        }
                    };
                    let _ = respond_to.send(changed);
                }
                StoreRequest::GetState { respond_to } => {
                    let _ = respond_to.send(Arc::clone(&self.state));
                }
                StoreRequest::Subscribe { listener, respond_to } => {
                    let id = SubscriptionId(self.next_subscription);
                    self.next_subscription += 1;
                    self.listeners.push((id, listener));
                    info!(state_type, %id, listeners = self.listeners.len(), "Subscribed");
                    let _ = respond_to.send(id);
                }
                StoreRequest::Unsubscribe { id, respond_to } => {
                    let before = self.listeners.len();
                    self.listeners.retain(|(existing, _)| *existing != id);
                    let removed = self.listeners.len() < before;
                    if removed {
                        info!(state_type, %id, listeners = self.listeners.len(), "Unsubscribed");
                    } else {
                        warn!(state_type, %id, "Unknown subscription");
                    }
                    let _ = respond_to.send(removed);
                }
            }
        }

        info!(state_type, revision, "Shutdown");
        self.state
    }
}
