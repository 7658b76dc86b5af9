//! # Store Messages
//!
//! The requests a [`StoreClient`](crate::StoreClient) sends to a
//! [`StoreActor`](crate::StoreActor), and the reply channel they carry.

use crate::state::StoreState;
use std::fmt;
use std::sync::Arc;
use tokio::sync::oneshot;

/// Type alias for the one-shot reply channel carried by every request.
pub type Response<T> = oneshot::Sender<T>;

/// Callback invoked with the new snapshot after every reference-changing dispatch.
///
/// Listeners run on the store task, between two requests. They should be quick and
/// must not call back into the store synchronously. A listener that panics is
/// unregistered instead of taking the store down.
pub type Listener<S> = Box<dyn Fn(&Arc<S>) + Send + Sync>;

/// Identifies one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subscription_{}", self.0)
    }
}

/// Internal message type sent to the store task.
///
/// There is exactly one mutating request, `Dispatch`. Everything else reads the
/// current snapshot or manages listeners.
pub enum StoreRequest<S: StoreState> {
    /// Apply one action. Replies `true` iff the snapshot reference changed.
    Dispatch {
        action: S::Action,
        respond_to: Response<bool>,
    },
    GetState {
        respond_to: Response<Arc<S>>,
    },
    Subscribe {
        listener: Listener<S>,
        respond_to: Response<SubscriptionId>,
    },
    /// Replies `false` when the id was not registered.
    Unsubscribe {
        id: SubscriptionId,
        respond_to: Response<bool>,
    },
}

impl<S: StoreState> fmt::Debug for StoreRequest<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dispatch { action, .. } => f.debug_struct("Dispatch").field("action", action).finish(),
            Self::GetState { .. } => f.write_str("GetState"),
            Self::Subscribe { .. } => f.write_str("Subscribe"),
            Self::Unsubscribe { id, .. } => f.debug_struct("Unsubscribe").field("id", id).finish(),
        }
    }
}
