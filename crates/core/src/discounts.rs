//! Discount Badges
//!
//! Rules that flag qualifying cart lines for display. A matched rule annotates a line
//! with a badge; it never changes the priced subtotal or total.

use rusty_money::{Money, iso::Currency};
use smallvec::{SmallVec, smallvec};

use crate::{cart::CartItem, pricing::PricingError};

/// Reward amount, in minor units, advertised on weight-based promo items.
pub const KG_DISCOUNT_AMOUNT: u64 = 100;

/// A named keyword rule over item display names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountRule {
    name: String,
    keywords: SmallVec<[String; 4]>,
    amount: u64,
}

impl DiscountRule {
    /// Create a rule matching any of `keywords` (case- and spacing-insensitive).
    pub fn new(name: impl Into<String>, keywords: &[&str], amount: u64) -> Self {
        Self {
            name: name.into(),
            keywords: keywords.iter().map(|keyword| normalise(keyword)).collect(),
            amount,
        }
    }

    /// Rule for items sold as a one kilogram unit.
    pub fn weight_based() -> Self {
        Self {
            name: "1kg promo".to_string(),
            keywords: smallvec![
                "1kg".to_string(),
                "1 kg".to_string(),
                "1 kilo".to_string(),
                "1kilo".to_string(),
            ],
            amount: KG_DISCOUNT_AMOUNT,
        }
    }

    /// Rule name shown on the badge.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Advertised reward in minor units.
    pub fn amount(&self) -> u64 {
        self.amount
    }

    /// Whether the display name qualifies for this rule.
    pub fn matches(&self, display_name: &str) -> bool {
        let name = normalise(display_name);

        self.keywords
            .iter()
            .filter(|keyword| !keyword.is_empty())
            .any(|keyword| {
                name.match_indices(keyword.as_str())
                    .any(|(start, _)| starts_word(name.get(..start).unwrap_or_default()))
            })
    }

    /// The advertised reward as money.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] when the amount does not fit in an `i64`.
    pub fn reward(
        &self,
        currency: &'static Currency,
    ) -> Result<Money<'static, Currency>, PricingError> {
        let amount = i64::try_from(self.amount)
            .ok()
            .ok_or(PricingError::Overflow)?;

        Ok(Money::from_minor(amount, currency))
    }
}

/// A cart line together with the rules it qualifies for.
#[derive(Debug, Clone, PartialEq)]
pub struct LineAnnotation<'a> {
    /// The annotated line.
    pub item: &'a CartItem,

    /// Matching rules, in rule order.
    pub badges: SmallVec<[&'a DiscountRule; 2]>,
}

impl LineAnnotation<'_> {
    /// Whether any rule matched this line.
    pub fn is_promo(&self) -> bool {
        !self.badges.is_empty()
    }
}

/// Annotate every cart line with the rules its display name matches.
pub fn annotate<'a>(items: &'a [CartItem], rules: &'a [DiscountRule]) -> Vec<LineAnnotation<'a>> {
    items
        .iter()
        .map(|item| LineAnnotation {
            item,
            badges: rules.iter().filter(|rule| rule.matches(&item.name)).collect(),
        })
        .collect()
}

/// A keyword only counts at a word start, and not after a decimal separator (`0.1kg`, `2,1kg`).
fn starts_word(before: &str) -> bool {
    let mut preceding = before.chars().rev();

    match (preceding.next(), preceding.next()) {
        (None, _) => true,
        (Some('.' | ','), Some(digit)) if digit.is_ascii_digit() => false,
        (Some(previous), _) => !previous.is_alphanumeric(),
    }
}

fn normalise(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
