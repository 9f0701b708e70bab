//! Orders
//!
//! The guest order payload assembled at checkout and the local record of a placed
//! order kept for the confirmation view.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{cart::CartItem, checkout::CheckoutForm, pricing::PricingSnapshot};

/// Prefix for locally generated order numbers.
pub const ORDER_NUMBER_PREFIX: &str = "ORD";

/// How the order is paid for. Only pay-on-delivery is offered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash on delivery.
    #[default]
    Cash,
}

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Received, not yet processed.
    #[default]
    Pending,

    /// Being prepared.
    Processing,

    /// Handed to the courier.
    Shipped,

    /// Received by the customer.
    Delivered,

    /// Cancelled before delivery.
    Cancelled,
}

/// Contact details attached to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCustomer {
    /// First name.
    pub first_name: String,

    /// Last name.
    pub last_name: String,

    /// Email.
    pub email: String,

    /// Phone.
    pub phone: String,
}

/// Delivery address attached to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    /// Street address.
    pub address: String,

    /// City.
    pub city: String,

    /// Postal code.
    pub postal_code: String,
}

/// Payload sent to the order API.
///
/// Amounts are minor units of the pricing currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmission {
    /// Ordered lines, as held in the cart.
    pub items: Vec<CartItem>,

    /// Contact details.
    pub customer: OrderCustomer,

    /// Delivery address.
    pub shipping: ShippingAddress,

    /// Payment method.
    pub payment_method: PaymentMethod,

    /// Sum of line totals.
    pub subtotal: i64,

    /// Shipping charged.
    pub shipping_cost: i64,

    /// Amount due on delivery.
    pub total: i64,

    /// Delivery notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_notes: Option<String>,
}

impl OrderSubmission {
    /// Assemble the payload from the cart, the checkout form and its pricing.
    pub fn assemble(items: &[CartItem], form: &CheckoutForm, pricing: &PricingSnapshot) -> Self {
        Self {
            items: items.to_vec(),
            customer: OrderCustomer {
                first_name: form.first_name.trim().to_string(),
                last_name: form.last_name.trim().to_string(),
                email: form.email.trim().to_string(),
                phone: form.phone.trim().to_string(),
            },
            shipping: ShippingAddress {
                address: form.address.trim().to_string(),
                city: form.city.trim().to_string(),
                postal_code: form.postal_code.trim().to_string(),
            },
            payment_method: PaymentMethod::Cash,
            subtotal: pricing.subtotal().to_minor_units(),
            shipping_cost: pricing.shipping_cost().to_minor_units(),
            total: pricing.total().to_minor_units(),
            order_notes: form.order_notes().map(str::to_string),
        }
    }
}

/// Pricing block of a stored order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPricing {
    /// Sum of line totals.
    pub subtotal: i64,

    /// Shipping charged.
    pub shipping: i64,

    /// Amount due.
    pub total: i64,
}

/// A placed order as remembered locally for the confirmation view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    /// Identifier assigned by the order API.
    pub order_id: String,

    /// Customer-facing order number.
    pub order_number: String,

    /// When the order was placed.
    pub order_date: Timestamp,

    /// Contact details.
    pub customer_info: OrderCustomer,

    /// Delivery address.
    pub shipping_address: ShippingAddress,

    /// Ordered lines.
    pub items: Vec<CartItem>,

    /// Amounts at submission time.
    pub pricing: OrderPricing,

    /// Payment method.
    pub payment_method: PaymentMethod,

    /// Status at placement.
    pub status: OrderStatus,

    /// Delivery notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl OrderRecord {
    /// Build the local record for a submission the API accepted.
    pub fn from_submission(
        submission: OrderSubmission,
        order_id: String,
        order_number: String,
        order_date: Timestamp,
        status: OrderStatus,
    ) -> Self {
        Self {
            order_id,
            order_number,
            order_date,
            customer_info: submission.customer,
            shipping_address: submission.shipping,
            items: submission.items,
            pricing: OrderPricing {
                subtotal: submission.subtotal,
                shipping: submission.shipping_cost,
                total: submission.total,
            },
            payment_method: submission.payment_method,
            status,
            notes: submission.order_notes,
        }
    }
}

/// Generate an order number from the placement time.
pub fn generate_order_number(placed_at: Timestamp) -> String {
    format!("{ORDER_NUMBER_PREFIX}-{}", placed_at.as_millisecond())
}
