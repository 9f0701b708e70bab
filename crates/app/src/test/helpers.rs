//! Test Helpers

use std::num::NonZeroU32;

use storefront::prelude::{CartItem, CheckoutForm, Customer, ShippingField};

use crate::api::{ApiError, BearerToken, models::LoginResponse};

pub(crate) fn customer() -> Customer {
    Customer {
        id: "c-1".to_string(),
        name: "Ana Maria Petrovic".to_string(),
        email: "ana@example.com".to_string(),
        phone: None,
        mobile: Some("+381 64 111".to_string()),
        address: Some("Main St 1".to_string()),
    }
}

pub(crate) fn login_response(token: &str) -> LoginResponse {
    LoginResponse {
        user: customer(),
        token: BearerToken::new(token),
    }
}

pub(crate) fn cart_item(id: &str, price: u64, quantity: u32) -> CartItem {
    CartItem::new(
        id,
        format!("Item {id}"),
        price,
        NonZeroU32::new(quantity).unwrap_or(NonZeroU32::MIN),
    )
}

pub(crate) fn fill_shipping(form: &mut CheckoutForm) {
    for field in ShippingField::ALL {
        form.set(field, format!("{field} value"));
    }
}

pub(crate) fn rejected(status: u16, message: Option<&str>) -> ApiError {
    ApiError::Rejected {
        status,
        message: message.map(str::to_string),
    }
}
