//! # Storefront Configuration
//!
//! Timings of the simulated loaders and the checkout, plus the store's request buffer.
//!
//! Defaults come first; environment variables override them:
//!
//! | Variable | Field | Default |
//! |---|---|---|
//! | `STOREFRONT_CATALOG_DELAY_MS` | `catalog_delay` | 1000 |
//! | `STOREFRONT_SESSION_DELAY_MS` | `session_delay` | 500 |
//! | `STOREFRONT_CHECKOUT_DELAY_MS` | `checkout_delay` | 1000 |
//! | `STOREFRONT_STORE_CAPACITY` | `store_capacity` | 32 |
//! | `STOREFRONT_CHECKOUT_FAILURE` | `checkout_failure` | unset |
//!
//! A set `STOREFRONT_CHECKOUT_FAILURE` makes every checkout fail with that reason.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const CATALOG_DELAY_VAR: &str = "STOREFRONT_CATALOG_DELAY_MS";
pub const SESSION_DELAY_VAR: &str = "STOREFRONT_SESSION_DELAY_MS";
pub const CHECKOUT_DELAY_VAR: &str = "STOREFRONT_CHECKOUT_DELAY_MS";
pub const STORE_CAPACITY_VAR: &str = "STOREFRONT_STORE_CAPACITY";
pub const CHECKOUT_FAILURE_VAR: &str = "STOREFRONT_CHECKOUT_FAILURE";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },

    #[error("STOREFRONT_STORE_CAPACITY must be at least 1")]
    ZeroCapacity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Time until the catalog "arrives".
    pub catalog_delay: Duration,
    /// Time until the user session "arrives".
    pub session_delay: Duration,
    /// Time a checkout takes to settle.
    pub checkout_delay: Duration,
    /// Bound of the store's request channel.
    pub store_capacity: usize,
    /// When set, checkouts fail with this reason instead of clearing the cart.
    pub checkout_failure: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            catalog_delay: Duration::from_millis(1000),
            session_delay: Duration::from_millis(500),
            checkout_delay: Duration::from_millis(1000),
            store_capacity: 32,
            checkout_failure: None,
        }
    }
}

impl StorefrontConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(delay) = millis(&lookup, CATALOG_DELAY_VAR)? {
            config.catalog_delay = delay;
        }
        if let Some(delay) = millis(&lookup, SESSION_DELAY_VAR)? {
            config.session_delay = delay;
        }
        if let Some(delay) = millis(&lookup, CHECKOUT_DELAY_VAR)? {
            config.checkout_delay = delay;
        }
        if let Some(raw) = lookup(STORE_CAPACITY_VAR) {
            config.store_capacity = parse(STORE_CAPACITY_VAR, &raw)?;
            debug!(capacity = config.store_capacity, "Overriding store capacity from environment");
        }
        if let Some(reason) = lookup(CHECKOUT_FAILURE_VAR).filter(|r| !r.trim().is_empty()) {
            debug!(reason = %reason, "Checkout failures enabled from environment");
            config.checkout_failure = Some(reason);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

fn parse<T: std::str::FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        var,
        value: raw.to_string(),
    })
}

fn millis(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<Duration>, ConfigError> {
    lookup(var)
        .map(|raw| {
            let ms: u64 = parse(var, &raw)?;
            debug!(var, ms, "Overriding delay from environment");
            Ok(Duration::from_millis(ms))
        })
        .transpose()
}
