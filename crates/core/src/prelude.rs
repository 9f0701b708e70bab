//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::CartItem,
    checkout::{
        CheckoutForm, CheckoutStep, CheckoutWizard, ShippingField, ShippingValidationError,
    },
    customers::{
        Customer, CustomerUpdate, Password, RegisterData, RegistrationError, RegistrationForm,
    },
    discounts::{DiscountRule, LineAnnotation, annotate},
    orders::{
        OrderCustomer, OrderPricing, OrderRecord, OrderStatus, OrderSubmission, PaymentMethod,
        ShippingAddress, generate_order_number,
    },
    pricing::{PricingError, PricingSnapshot, ShippingPolicy, price_cart},
};
