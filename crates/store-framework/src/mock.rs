//! # Mock Store
//!
//! Utilities for testing code that talks to a store (effects, flows, views) without
//! running a real [`StoreActor`](crate::StoreActor).
//!
//! Two styles are available:
//! - **Channel inspection**: [`create_mock_store`] hands back the raw receiver, and
//!   helpers like [`expect_dispatch`] pull the next request off it so the test decides
//!   what to reply.
//! - **Recording**: [`RecordingStore`] answers every request on its own and keeps a log
//!   of dispatched actions to assert on afterwards.

use crate::client::StoreClient;
use crate::message::{Response, StoreRequest, SubscriptionId};
use crate::state::StoreState;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;

/// Creates a client wired to a receiver the test controls.
pub fn create_mock_store<S: StoreState>(
    buffer_size: usize,
) -> (StoreClient<S>, mpsc::Receiver<StoreRequest<S>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Dispatch request
pub async fn expect_dispatch<S: StoreState>(
    receiver: &mut mpsc::Receiver<StoreRequest<S>>,
) -> Option<(S::Action, Response<bool>)> {
    match receiver.recv().await {
        Some(StoreRequest::Dispatch { action, respond_to }) => Some((action, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a GetState request
pub async fn expect_get_state<S: StoreState>(
    receiver: &mut mpsc::Receiver<StoreRequest<S>>,
) -> Option<Response<Arc<S>>> {
    match receiver.recv().await {
        Some(StoreRequest::GetState { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// A stand-in store that records every dispatched action.
///
/// `GetState` is answered with a fixed snapshot, dispatches are acknowledged as
/// changes, and subscriptions are accepted but never called.
///
/// ```ignore
/// let mock = RecordingStore::new(AppState::default());
/// some_effect(mock.client()).await;
/// assert_eq!(mock.actions(), vec![AppAction::ClearCart]);
/// ```
pub struct RecordingStore<S: StoreState> {
    client: StoreClient<S>,
    actions: Arc<Mutex<Vec<S::Action>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<S: StoreState> RecordingStore<S>
where
    S::Action: Clone,
{
    pub fn new(snapshot: S) -> Self {
        let (client, mut receiver) = create_mock_store::<S>(100);
        let actions = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&actions);
        let snapshot = Arc::new(snapshot);

        let handle = tokio::spawn(async move {
            let mut next_id = 1;
            while let Some(request) = receiver.recv().await {
                match request {
                    StoreRequest::Dispatch { action, respond_to } => {
                        log.lock().unwrap_or_else(PoisonError::into_inner).push(action);
                        let _ = respond_to.send(true);
                    }
                    StoreRequest::GetState { respond_to } => {
                        let _ = respond_to.send(Arc::clone(&snapshot));
                    }
                    StoreRequest::Subscribe { respond_to, .. } => {
                        let _ = respond_to.send(SubscriptionId(next_id));
                        next_id += 1;
                    }
                    StoreRequest::Unsubscribe { respond_to, .. } => {
                        let _ = respond_to.send(true);
                    }
                }
            }
        });

        Self {
            client,
            actions,
            _handle: handle,
        }
    }

    /// Returns a client for use in tests.
    pub fn client(&self) -> StoreClient<S> {
        self.client.clone()
    }

    /// Actions received so far, in dispatch order.
    pub fn actions(&self) -> Vec<S::Action> {
        self.actions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
