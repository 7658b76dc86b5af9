use crate::actions::AppAction;
use crate::model::{AppError, Product};
use crate::state::AppState;
use async_trait::async_trait;
use std::time::Duration;
use store_framework::{Effect, StoreClient, StoreError};
use tracing::{info, warn};

/// Simulated catalog fetch.
///
/// Sets `loading` as soon as it is scheduled. Once the delay is up it either installs
/// the catalog or, if the catalog does not validate, records
/// [`AppError::CatalogUnavailable`]. Either way `loading` is lowered again.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    catalog: Vec<Product>,
    delay: Duration,
}

impl CatalogLoader {
    pub fn new(catalog: Vec<Product>, delay: Duration) -> Self {
        Self { catalog, delay }
    }
}

#[async_trait]
impl Effect<AppState> for CatalogLoader {
    fn name(&self) -> &'static str {
        "catalog_loader"
    }

    fn delay(&self) -> Duration {
        self.delay
    }

    async fn on_start(&mut self, store: &StoreClient<AppState>) -> Result<(), StoreError> {
        store.dispatch(AppAction::set_loading(true)).await?;
        Ok(())
    }

    async fn on_fire(&mut self, store: &StoreClient<AppState>) -> Result<(), StoreError> {
        let catalog = std::mem::take(&mut self.catalog);
        let count = catalog.len();

        match AppAction::set_products(catalog) {
            Ok(action) => {
                store.dispatch(action).await?;
                info!(products = count, "Catalog loaded");
            }
            Err(e) => {
                warn!(error = %e, "Rejected catalog");
                let error = AppError::CatalogUnavailable(e.to_string());
                store.dispatch(AppAction::set_error(error)).await?;
            }
        }

        store.dispatch(AppAction::set_loading(false)).await?;
        Ok(())
    }
}
