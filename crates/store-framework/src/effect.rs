//! # Scheduled Effects
//!
//! Side work that ends in dispatching actions after a delay: loading data, finishing a
//! checkout. Each effect runs in its own Tokio task owned by a [`TaskHandle`].
//!
//! ## Cancellation
//!
//! Whoever starts an effect owns its handle. Cancelling the handle, or dropping it,
//! aborts the task. An aborted effect never dispatches again, which keeps actions from
//! reaching a store whose owner has already been torn down. The effect value itself is
//! dropped together with the task, so `Drop` guards inside an effect run on
//! cancellation too.
//!
//! ## Hooks
//!
//! Like entity lifecycle hooks, [`Effect`] has a provided `on_start` (runs right away)
//! and a required `on_fire` (runs once `delay` has elapsed).

use crate::client::StoreClient;
use crate::error::{EffectError, StoreError};
use crate::state::StoreState;
use async_trait::async_trait;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// A deferred unit of work that feeds actions into a store.
#[async_trait]
pub trait Effect<S: StoreState>: Send + 'static {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// How long to wait between `on_start` and `on_fire`.
    fn delay(&self) -> Duration;

    /// Called as soon as the effect is scheduled.
    async fn on_start(&mut self, _store: &StoreClient<S>) -> Result<(), StoreError> {
        Ok(())
    }

    /// Called once the delay has elapsed, unless the effect was cancelled first.
    async fn on_fire(&mut self, store: &StoreClient<S>) -> Result<(), StoreError>;
}

/// Spawns `effect` against `store` and returns the handle that owns it.
pub fn schedule<S, E>(store: StoreClient<S>, mut effect: E) -> TaskHandle
where
    S: StoreState,
    E: Effect<S>,
{
    let name = effect.name();
    let delay = effect.delay();
    debug!(effect = name, ?delay, "Scheduled");

    let handle = tokio::spawn(async move {
        effect.on_start(&store).await?;
        tokio::time::sleep(delay).await;
        info!(effect = name, "Firing");
        effect.on_fire(&store).await
    });

    TaskHandle {
        name,
        handle: Some(handle),
    }
}

/// Owner of one scheduled effect. Dropping it cancels the effect.
#[derive(Debug)]
pub struct TaskHandle {
    name: &'static str,
    handle: Option<JoinHandle<Result<(), StoreError>>>,
}

impl TaskHandle {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Aborts the effect. Calling this after it already finished does nothing.
    pub fn cancel(mut self) {
        self.abort();
    }

    /// Waits for the effect to run to completion.
    pub async fn join(mut self) -> Result<(), EffectError> {
        let name = self.name;
        let Some(handle) = self.handle.take() else {
            return Err(EffectError::Cancelled(name));
        };
        match handle.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(source)) => {
                warn!(effect = name, error = %source, "Effect failed");
                Err(EffectError::Store { name, source })
            }
            Err(e) if e.is_cancelled() => Err(EffectError::Cancelled(name)),
            Err(e) => Err(EffectError::Panicked {
                name,
                message: e.to_string(),
            }),
        }
    }

    fn abort(&mut self) {
        if let Some(handle) = self.handle.take() {
            if !handle.is_finished() {
                handle.abort();
                info!(effect = self.name, "Cancelled");
            }
        }
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.abort();
    }
}
