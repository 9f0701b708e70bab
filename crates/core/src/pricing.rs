//! Pricing
//!
//! Order pricing is derived from the cart on demand and never cached, so a snapshot is
//! always consistent with the items it was computed from.

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::cart::CartItem;

/// Subtotal, in minor units, that must be exceeded for shipping to be free.
pub const FREE_SHIPPING_THRESHOLD: i64 = 5000;

/// Shipping fee, in minor units, charged at or below the free-shipping threshold.
pub const FLAT_SHIPPING_FEE: i64 = 200;

/// Errors that can occur while pricing a cart.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// An amount does not fit in the signed minor-unit range used for arithmetic.
    #[error("amount overflowed while pricing the cart")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Shipping fee rules applied on top of the cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShippingPolicy {
    currency: &'static Currency,
    free_shipping_threshold: Money<'static, Currency>,
    flat_fee: Money<'static, Currency>,
}

impl ShippingPolicy {
    /// Creates a shipping policy from minor-unit amounts.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] when an amount does not fit in an `i64`.
    pub fn new(
        currency: &'static Currency,
        free_shipping_threshold: u64,
        flat_fee: u64,
    ) -> Result<Self, PricingError> {
        Ok(Self {
            currency,
            free_shipping_threshold: minor(free_shipping_threshold, currency)?,
            flat_fee: minor(flat_fee, currency)?,
        })
    }

    /// Standard storefront policy in the given currency.
    pub fn standard(currency: &'static Currency) -> Self {
        Self {
            currency,
            free_shipping_threshold: Money::from_minor(FREE_SHIPPING_THRESHOLD, currency),
            flat_fee: Money::from_minor(FLAT_SHIPPING_FEE, currency),
        }
    }

    /// Currency every amount is priced in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Subtotal that must be exceeded for free shipping.
    pub fn free_shipping_threshold(&self) -> Money<'static, Currency> {
        self.free_shipping_threshold
    }

    /// Fee charged when the threshold is not exceeded.
    pub fn flat_fee(&self) -> Money<'static, Currency> {
        self.flat_fee
    }

    /// Shipping cost for the given subtotal.
    ///
    /// A subtotal exactly equal to the threshold still pays the flat fee.
    pub fn shipping_cost(&self, subtotal: &Money<'static, Currency>) -> Money<'static, Currency> {
        if subtotal.to_minor_units() > self.free_shipping_threshold.to_minor_units() {
            Money::from_minor(0, self.currency)
        } else {
            self.flat_fee
        }
    }
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self::standard(rusty_money::iso::USD)
    }
}

/// Derived pricing for a cart at a single point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingSnapshot {
    subtotal: Money<'static, Currency>,
    shipping_cost: Money<'static, Currency>,
    total: Money<'static, Currency>,
}

impl PricingSnapshot {
    /// Sum of `price × quantity` over every line.
    pub fn subtotal(&self) -> Money<'static, Currency> {
        self.subtotal
    }

    /// Shipping charged for this order.
    pub fn shipping_cost(&self) -> Money<'static, Currency> {
        self.shipping_cost
    }

    /// `subtotal + shipping_cost`.
    pub fn total(&self) -> Money<'static, Currency> {
        self.total
    }

    /// Whether the free-shipping threshold was exceeded.
    pub fn has_free_shipping(&self) -> bool {
        self.shipping_cost.to_minor_units() == 0
    }
}

/// Prices a cart.
///
/// An empty cart prices to a zero subtotal plus the flat fee.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: a line or the subtotal does not fit in an `i64`.
/// - [`PricingError::Money`]: wrapped money arithmetic or currency mismatch error.
pub fn price_cart(
    items: &[CartItem],
    policy: &ShippingPolicy,
) -> Result<PricingSnapshot, PricingError> {
    let currency = policy.currency();

    let subtotal = items.iter().try_fold(0_i64, |acc, item| {
        let line = item.line_total(currency)?;

        acc.checked_add(line.to_minor_units())
            .ok_or(PricingError::Overflow)
    })?;

    let subtotal = Money::from_minor(subtotal, currency);
    let shipping_cost = policy.shipping_cost(&subtotal);

    if subtotal
        .to_minor_units()
        .checked_add(shipping_cost.to_minor_units())
        .is_none()
    {
        return Err(PricingError::Overflow);
    }

    let total = subtotal.add(shipping_cost)?;

    Ok(PricingSnapshot {
        subtotal,
        shipping_cost,
        total,
    })
}

fn minor(
    amount: u64,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, PricingError> {
    let amount = i64::try_from(amount).ok().ok_or(PricingError::Overflow)?;

    Ok(Money::from_minor(amount, currency))
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use super::*;

    fn item(id: &str, price: u64, quantity: u32) -> CartItem {
        CartItem::new(
            id,
            "Widget",
            price,
            NonZeroU32::new(quantity).unwrap_or(NonZeroU32::MIN),
        )
    }

    #[test]
    fn free_shipping_above_threshold() -> TestResult {
        let pricing = price_cart(&[item("a", 3000, 2)], &ShippingPolicy::default())?;

        assert_eq!(pricing.subtotal(), Money::from_minor(6000, USD));
        assert_eq!(pricing.shipping_cost(), Money::from_minor(0, USD));
        assert_eq!(pricing.total(), Money::from_minor(6000, USD));
        assert!(pricing.has_free_shipping());

        Ok(())
    }

    #[test]
    fn flat_fee_below_threshold() -> TestResult {
        let pricing = price_cart(&[item("a", 1000, 1)], &ShippingPolicy::default())?;

        assert_eq!(pricing.subtotal(), Money::from_minor(1000, USD));
        assert_eq!(pricing.shipping_cost(), Money::from_minor(200, USD));
        assert_eq!(pricing.total(), Money::from_minor(1200, USD));
        assert!(!pricing.has_free_shipping());

        Ok(())
    }

    #[test]
    fn threshold_itself_pays_flat_fee() -> TestResult {
        let pricing = price_cart(
            &[item("a", 2500, 1), item("b", 1250, 2)],
            &ShippingPolicy::default(),
        )?;

        assert_eq!(pricing.subtotal(), Money::from_minor(5000, USD));
        assert_eq!(pricing.shipping_cost(), Money::from_minor(200, USD));
        assert_eq!(pricing.total(), Money::from_minor(5200, USD));

        Ok(())
    }

    #[test]
    fn one_unit_over_threshold_ships_free() -> TestResult {
        let pricing = price_cart(&[item("a", 5001, 1)], &ShippingPolicy::default())?;

        assert_eq!(pricing.shipping_cost(), Money::from_minor(0, USD));

        Ok(())
    }

    #[test]
    fn empty_cart_pays_flat_fee_only() -> TestResult {
        let pricing = price_cart(&[], &ShippingPolicy::default())?;

        assert_eq!(pricing.subtotal(), Money::from_minor(0, USD));
        assert_eq!(pricing.total(), Money::from_minor(200, USD));

        Ok(())
    }

    #[test]
    fn custom_policy_uses_its_currency_and_amounts() -> TestResult {
        let policy = ShippingPolicy::new(GBP, 10_000, 499)?;
        let pricing = price_cart(&[item("a", 4000, 2)], &policy)?;

        assert_eq!(pricing.subtotal(), Money::from_minor(8000, GBP));
        assert_eq!(pricing.shipping_cost(), Money::from_minor(499, GBP));
        assert_eq!(pricing.total(), Money::from_minor(8499, GBP));

        Ok(())
    }

    #[test]
    fn policy_rejects_amounts_beyond_i64() {
        assert_eq!(
            ShippingPolicy::new(USD, u64::MAX, 200),
            Err(PricingError::Overflow)
        );
    }

    #[test]
    fn subtotal_overflow_is_reported() {
        let max = u64::try_from(i64::MAX).unwrap_or_default();
        let result = price_cart(&[item("a", max, 1), item("b", 1, 1)], &ShippingPolicy::default());

        assert_eq!(result, Err(PricingError::Overflow));
    }
}
