//! API Config

use std::time::Duration;

use clap::Args;

use crate::api::HttpConfig;

/// Storefront backend settings.
#[derive(Debug, Args)]
pub struct ApiConfig {
    /// Storefront API base URL
    #[arg(long, env = "STOREFRONT_API_URL", default_value = "http://localhost:3000/api")]
    pub api_url: String,

    /// Request timeout in seconds; no timeout when omitted
    #[arg(long, env = "STOREFRONT_API_TIMEOUT_SECONDS")]
    pub api_timeout_seconds: Option<u64>,
}

impl ApiConfig {
    #[must_use]
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            base_url: self.api_url.clone(),
            timeout: self.api_timeout_seconds.map(Duration::from_secs),
        }
    }
}
