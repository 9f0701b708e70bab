//! Cart

use std::num::NonZeroU32;

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

use crate::pricing::PricingError;

/// A line item held in the customer's cart.
///
/// Prices are integer minor units of the store currency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Unit price in minor units.
    pub price: u64,

    /// Number of units, never zero.
    pub quantity: NonZeroU32,

    /// Optional product image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CartItem {
    /// Creates a new line item without an image.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: u64,
        quantity: NonZeroU32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity,
            image: None,
        }
    }

    /// Sets the image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Returns `price × quantity` in the given currency.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] when the line total does not fit in an `i64`.
    pub fn line_total(
        &self,
        currency: &'static Currency,
    ) -> Result<Money<'static, Currency>, PricingError> {
        let total = i64::try_from(self.price)
            .ok()
            .and_then(|price| price.checked_mul(i64::from(self.quantity.get())))
            .ok_or(PricingError::Overflow)?;

        Ok(Money::from_minor(total, currency))
    }
}
