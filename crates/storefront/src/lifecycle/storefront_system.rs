use crate::config::StorefrontConfig;
use crate::effects::{CatalogLoader, CheckoutError, CheckoutFlow, SessionLoader};
use crate::fixtures::{mock_catalog, mock_user};
use crate::selectors::StoreSelectors;
use crate::state::AppState;
use std::sync::Arc;
use store_framework::{schedule, EffectError, StoreActor, StoreClient, StoreError, TaskHandle};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Store task failed: {0}")]
    StoreTaskFailed(String),
}

/// The running storefront: one store, its selectors, and the effects started for it.
///
/// `StorefrontSystem` is responsible for:
/// - **Lifecycle Management**: spawning the store task and stopping it again
/// - **Startup Effects**: scheduling the catalog and session loaders
/// - **Ownership of Effects**: every loader handle lives here, so shutdown can cancel
///   whatever has not fired yet
///
/// # Example
///
/// ```ignore
/// let mut system = StorefrontSystem::start(StorefrontConfig::from_env()?);
/// system.wait_for_startup().await?;
///
/// let state = system.store.get_state().await?;
/// let first = state.products[0].clone();
/// system.store.dispatch(AppAction::add_to_cart(&first)?).await?;
///
/// system.checkout().await?.join().await?;
/// let last = system.shutdown().await?;
/// ```
#[derive(Debug)]
pub struct StorefrontSystem {
    /// Client for dispatching to and reading from the store
    pub store: StoreClient<AppState>,

    /// Memoized derived values for this store
    pub selectors: StoreSelectors,

    checkout: CheckoutFlow,
    effects: Vec<TaskHandle>,
    handle: JoinHandle<Arc<AppState>>,
}

impl StorefrontSystem {
    /// Spawns the store with an empty state and schedules the catalog and session
    /// loaders.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(config: StorefrontConfig) -> Self {
        info!(?config, "Starting storefront");

        let (actor, store) = StoreActor::new(AppState::default(), config.store_capacity);
        let handle = tokio::spawn(actor.run());

        let effects = vec![
            schedule(
                store.clone(),
                CatalogLoader::new(mock_catalog(), config.catalog_delay),
            ),
            schedule(
                store.clone(),
                SessionLoader::new(mock_user(), config.session_delay),
            ),
        ];
        let checkout = CheckoutFlow::new(
            store.clone(),
            config.checkout_delay,
            config.checkout_failure,
        );

        Self {
            store,
            selectors: StoreSelectors::new(),
            checkout,
            effects,
            handle,
        }
    }

    /// Waits until every startup loader has run.
    ///
    /// A failing loader does not cut the wait short: every loader is joined, each
    /// failure is logged, and the first one is returned.
    pub async fn wait_for_startup(&mut self) -> Result<(), EffectError> {
        let mut first_error = None;
        for effect in self.effects.drain(..) {
            let name = effect.name();
            if let Err(e) = effect.join().await {
                warn!(effect = name, error = %e, "Startup loader did not complete");
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => {
                info!("Storefront ready");
                Ok(())
            }
        }
    }

    /// Current snapshot.
    pub async fn state(&self) -> Result<Arc<AppState>, StoreError> {
        self.store.get_state().await
    }

    /// Starts a checkout of the current cart. See [`CheckoutFlow::start`].
    pub async fn checkout(&self) -> Result<TaskHandle, CheckoutError> {
        self.checkout.start().await
    }

    pub fn is_checkout_in_progress(&self) -> bool {
        self.checkout.is_in_progress()
    }

    /// Cancels pending loaders, closes the store and returns its final snapshot.
    ///
    /// The store exits once every client is gone. Handles obtained from the system
    /// (cloned clients, subscriptions, checkout tasks) must be dropped first, or this
    /// waits for them.
    pub async fn shutdown(self) -> Result<Arc<AppState>, SystemError> {
        info!("Shutting down storefront...");

        for effect in self.effects {
            effect.cancel();
        }
        drop(self.checkout);
        drop(self.store);

        match self.handle.await {
            Ok(state) => {
                info!(
                    products = state.products.len(),
                    cart_lines = state.cart.len(),
                    "Storefront shutdown complete."
                );
                Ok(state)
            }
            Err(e) => {
                error!(error = %e, "Store task failed");
                Err(SystemError::StoreTaskFailed(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::mock_user;
    use async_trait::async_trait;
    use std::time::Duration;
    use store_framework::Effect;

    struct Broken;

    #[async_trait]
    impl Effect<AppState> for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn delay(&self) -> Duration {
            Duration::ZERO
        }

        async fn on_fire(&mut self, _store: &StoreClient<AppState>) -> Result<(), StoreError> {
            Err(StoreError::StoreDropped)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_loader_does_not_cancel_the_rest() {
        let mut system = StorefrontSystem::start(StorefrontConfig {
            catalog_delay: Duration::from_millis(100),
            session_delay: Duration::from_millis(50),
            ..StorefrontConfig::default()
        });
        let broken = schedule(system.store.clone(), Broken);
        system.effects.insert(0, broken);

        let err = system.wait_for_startup().await.unwrap_err();
        assert!(matches!(err, EffectError::Store { name: "broken", .. }));

        let state = system.state().await.unwrap();
        assert_eq!(state.products.len(), 6);
        assert_eq!(state.user, Some(mock_user()));
        assert!(!state.loading);

        system.shutdown().await.unwrap();
    }
}
