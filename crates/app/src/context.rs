//! App Context

use std::sync::Arc;

use storefront::prelude::{DiscountRule, ShippingPolicy};
use thiserror::Error;

use crate::{
    api::{ApiError, HttpStorefrontClient},
    cart::StoredCart,
    checkout::CheckoutServices,
    config::{ClientConfig, ConfigError},
    session::SessionStore,
    storage::{FileStore, KeyValueStore, StorageError},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to open data directory")]
    Storage(#[from] StorageError),

    #[error("failed to build storefront API client")]
    Api(#[from] ApiError),

    #[error("invalid configuration")]
    Config(#[from] ConfigError),
}

/// Long-lived services wired from configuration.
#[derive(Clone)]
pub struct AppContext {
    pub store: Arc<dyn KeyValueStore>,
    pub api: Arc<HttpStorefrontClient>,
    pub cart: Arc<StoredCart>,
    pub policy: ShippingPolicy,
}

impl AppContext {
    /// Build application context from client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the data directory cannot be opened, the HTTP client
    /// cannot be built, or the pricing settings are invalid.
    pub fn from_config(config: &ClientConfig) -> Result<Self, AppInitError> {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&config.storage.data_dir)?);
        let api = Arc::new(HttpStorefrontClient::new(
            config.api.http_config(),
            store.clone(),
        )?);

        Ok(Self {
            cart: Arc::new(StoredCart::new(store.clone())),
            policy: config.pricing.shipping_policy()?,
            store,
            api,
        })
    }

    /// Session restored from the data directory.
    #[must_use]
    pub fn session(&self) -> SessionStore {
        SessionStore::restore(self.api.clone(), self.store.clone())
    }

    #[must_use]
    pub fn checkout_services(&self) -> CheckoutServices {
        CheckoutServices {
            orders: self.api.clone(),
            cart: self.cart.clone(),
            store: self.store.clone(),
            policy: self.policy,
            rules: vec![DiscountRule::weight_based()],
        }
    }
}
