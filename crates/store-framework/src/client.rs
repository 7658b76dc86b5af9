//! # Store Client
//!
//! The cloneable handle every consumer holds instead of the store itself.

use crate::error::StoreError;
use crate::message::{StoreRequest, SubscriptionId};
use crate::state::StoreState;
use std::fmt;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// A type-safe client for a running [`StoreActor`](crate::StoreActor).
///
/// Holds only a channel sender, so cloning is cheap. Once every clone is dropped the
/// store task finishes its loop and exits.
pub struct StoreClient<S: StoreState> {
    sender: mpsc::Sender<StoreRequest<S>>,
}

impl<S: StoreState> Clone for StoreClient<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<S: StoreState> fmt::Debug for StoreClient<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreClient")
            .field("closed", &self.sender.is_closed())
            .finish()
    }
}

impl<S: StoreState> StoreClient<S> {
    pub fn new(sender: mpsc::Sender<StoreRequest<S>>) -> Self {
        Self { sender }
    }

    /// Submits one action and waits until the resulting snapshot is installed.
    ///
    /// Resolves to `true` when the snapshot reference changed, `false` for a no-op.
    #[instrument(level = "debug", skip(self))]
    pub async fn dispatch(&self, action: S::Action) -> Result<bool, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Dispatch { action, respond_to })
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)
    }

    /// Returns the current immutable snapshot.
    pub async fn get_state(&self) -> Result<Arc<S>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::GetState { respond_to })
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)
    }

    /// Registers a listener called with every new snapshot.
    ///
    /// Dispatches that leave the state unchanged do not reach listeners.
    #[instrument(level = "debug", skip_all)]
    pub async fn subscribe<F>(&self, listener: F) -> Result<Subscription<S>, StoreError>
    where
        F: Fn(&Arc<S>) + Send + Sync + 'static,
    {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Subscribe {
                listener: Box::new(listener),
                respond_to,
            })
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        let id = response.await.map_err(|_| StoreError::StoreDropped)?;
        Ok(Subscription {
            id,
            client: self.clone(),
            detached: false,
        })
    }

    /// True once the store task has stopped receiving.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    async fn unsubscribe(&self, id: SubscriptionId) -> Result<bool, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Unsubscribe { id, respond_to })
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)
    }
}

/// Handle to a registered listener.
///
/// Dropping the handle detaches the listener on a best-effort basis: the request is
/// queued without waiting, and skipped if the store's channel is full or closed. Call
/// [`unsubscribe`](Subscription::unsubscribe) to detach and wait for confirmation.
/// The handle keeps a client clone, so the store stays alive while a subscription is
/// held.
pub struct Subscription<S: StoreState> {
    id: SubscriptionId,
    client: StoreClient<S>,
    detached: bool,
}

impl<S: StoreState> fmt::Debug for Subscription<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl<S: StoreState> Subscription<S> {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Detaches the listener. Resolves to `false` if it was already gone.
    pub async fn unsubscribe(mut self) -> Result<bool, StoreError> {
        self.detached = true;
        self.client.unsubscribe(self.id).await
    }
}

impl<S: StoreState> Drop for Subscription<S> {
    fn drop(&mut self) {
        if self.detached {
            return;
        }
        let (respond_to, _) = oneshot::channel();
        let request = StoreRequest::Unsubscribe {
            id: self.id,
            respond_to,
        };
        if self.client.sender.try_send(request).is_err() {
            debug!(id = %self.id, "Could not detach dropped subscription");
        }
    }
}
