//! Pricing Config

use clap::Args;
use rusty_money::{Findable, iso::Currency};
use storefront::{
    pricing::{FLAT_SHIPPING_FEE, FREE_SHIPPING_THRESHOLD},
    prelude::ShippingPolicy,
};

use crate::config::ConfigError;

/// Pricing settings.
#[derive(Debug, Args)]
pub struct PricingConfig {
    /// ISO 4217 currency code for all amounts
    #[arg(long, env = "STOREFRONT_CURRENCY", default_value = "USD")]
    pub currency: String,

    /// Subtotal, in minor units, above which shipping is free
    #[arg(long, env = "STOREFRONT_FREE_SHIPPING_THRESHOLD", default_value_t = FREE_SHIPPING_THRESHOLD.unsigned_abs())]
    pub free_shipping_threshold: u64,

    /// Shipping fee, in minor units, at or below the threshold
    #[arg(long, env = "STOREFRONT_FLAT_SHIPPING_FEE", default_value_t = FLAT_SHIPPING_FEE.unsigned_abs())]
    pub flat_shipping_fee: u64,
}

impl PricingConfig {
    /// Build the shipping policy described by these settings.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown currency code or out-of-range amounts.
    pub fn shipping_policy(&self) -> Result<ShippingPolicy, ConfigError> {
        let code = self.currency.trim().to_ascii_uppercase();

        let Some(currency) = Currency::find(&code) else {
            return Err(ConfigError::UnknownCurrency(self.currency.clone()));
        };

        Ok(ShippingPolicy::new(
            currency,
            self.free_shipping_threshold,
            self.flat_shipping_fee,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso};
    use testresult::TestResult;

    use super::*;

    fn config(currency: &str) -> PricingConfig {
        PricingConfig {
            currency: currency.to_string(),
            free_shipping_threshold: 5000,
            flat_shipping_fee: 200,
        }
    }

    #[test]
    fn default_amounts_match_standard_policy() -> TestResult {
        assert_eq!(
            config("usd").shipping_policy()?,
            ShippingPolicy::standard(iso::USD)
        );

        Ok(())
    }

    #[test]
    fn other_currencies_are_supported() -> TestResult {
        let policy = config("EUR").shipping_policy()?;

        assert_eq!(policy.flat_fee(), Money::from_minor(200, iso::EUR));

        Ok(())
    }

    #[test]
    fn unknown_currency_is_rejected() {
        let result = config("XYZ").shipping_policy();

        assert!(
            matches!(result, Err(ConfigError::UnknownCurrency(ref code)) if code == "XYZ"),
            "expected unknown currency, got {result:?}"
        );
    }
}
