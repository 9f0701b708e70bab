//! Client configuration

use clap::Args;
use thiserror::Error;

pub mod api;
pub mod logging;
pub mod pricing;
pub mod storage;

pub use api::ApiConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use pricing::PricingConfig;
pub use storage::StorageConfig;

/// Settings shared by every command.
#[derive(Debug, Args)]
pub struct ClientConfig {
    /// Storefront backend settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Local storage settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Pricing settings.
    #[command(flatten)]
    pub pricing: PricingConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown currency code `{0}`")]
    UnknownCurrency(String),

    #[error("invalid shipping amounts")]
    Shipping(#[from] storefront::prelude::PricingError),
}
