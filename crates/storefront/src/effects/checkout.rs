//! Simulated checkout.
//!
//! [`CheckoutFlow::start`] checks the preconditions right away and hands back a
//! [`TaskHandle`]; the outcome lands in the store after the configured delay. Only one
//! checkout runs at a time.

use crate::actions::AppAction;
use crate::model::AppError;
use crate::state::AppState;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use store_framework::{schedule, Effect, StoreClient, StoreError, TaskHandle};
use thiserror::Error;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("A checkout is already in progress")]
    InProgress,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Starts checkouts against one store.
#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    store: StoreClient<AppState>,
    delay: Duration,
    failure: Option<String>,
    in_progress: Arc<AtomicBool>,
}

impl CheckoutFlow {
    /// `failure`, when set, makes every checkout fail with that reason.
    pub fn new(store: StoreClient<AppState>, delay: Duration, failure: Option<String>) -> Self {
        Self {
            store,
            delay,
            failure,
            in_progress: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }

    /// Begins a checkout of the current cart.
    ///
    /// Fails with [`CheckoutError::EmptyCart`] when there is nothing to buy and with
    /// [`CheckoutError::InProgress`] while another checkout has not settled yet.
    /// Cancelling the returned handle abandons the checkout and frees the flow.
    #[instrument(level = "debug", skip(self))]
    pub async fn start(&self) -> Result<TaskHandle, CheckoutError> {
        let state = self.store.get_state().await?;
        if state.cart.is_empty() {
            warn!("Checkout refused: cart is empty");
            return Err(CheckoutError::EmptyCart);
        }

        if self
            .in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Checkout refused: already in progress");
            return Err(CheckoutError::InProgress);
        }

        let checkout = Checkout {
            delay: self.delay,
            failure: self.failure.clone(),
            lines: state.cart.len(),
            _guard: InProgressGuard(Arc::clone(&self.in_progress)),
        };
        Ok(schedule(self.store.clone(), checkout))
    }
}

/// Clears the in-progress flag when the checkout finishes or is dropped mid-way.
#[derive(Debug)]
struct InProgressGuard(Arc<AtomicBool>);

impl Drop for InProgressGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Debug)]
struct Checkout {
    delay: Duration,
    failure: Option<String>,
    lines: usize,
    _guard: InProgressGuard,
}

#[async_trait]
impl Effect<AppState> for Checkout {
    fn name(&self) -> &'static str {
        "checkout"
    }

    fn delay(&self) -> Duration {
        self.delay
    }

    async fn on_fire(&mut self, store: &StoreClient<AppState>) -> Result<(), StoreError> {
        match self.failure.take() {
            Some(reason) => {
                warn!(reason = %reason, "Checkout failed");
                let error = AppError::CheckoutFailed(reason);
                store.dispatch(AppAction::set_error(error)).await?;
            }
            None => {
                store.dispatch(AppAction::clear_cart()).await?;
                store.dispatch(AppAction::clear_error()).await?;
                info!(lines = self.lines, "Checkout complete");
            }
        }
        Ok(())
    }
}
