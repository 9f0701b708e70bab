//! Checkout form data.

use std::fmt;

use smallvec::SmallVec;
use thiserror::Error;

use crate::customers::Customer;

/// A required field on the shipping step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShippingField {
    /// Customer first name.
    FirstName,

    /// Customer last name.
    LastName,

    /// Contact email.
    Email,

    /// Contact phone.
    Phone,

    /// Street address.
    Address,

    /// City.
    City,

    /// Postal code.
    PostalCode,
}

impl ShippingField {
    /// Every required field, in form order.
    pub const ALL: [Self; 7] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Phone,
        Self::Address,
        Self::City,
        Self::PostalCode,
    ];

    /// Human readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "first name",
            Self::LastName => "last name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::City => "city",
            Self::PostalCode => "postal code",
        }
    }
}

impl fmt::Display for ShippingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shipping step validation failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("please fill in all required fields: {}", join_labels(.missing))]
pub struct ShippingValidationError {
    /// Empty required fields, in form order.
    pub missing: SmallVec<[ShippingField; 7]>,
}

fn join_labels(fields: &[ShippingField]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Contact and shipping details typed at checkout.
///
/// Lives for a single checkout and is never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    /// Customer first name.
    pub first_name: String,

    /// Customer last name.
    pub last_name: String,

    /// Contact email.
    pub email: String,

    /// Contact phone.
    pub phone: String,

    /// Street address.
    pub address: String,

    /// City.
    pub city: String,

    /// Postal code.
    pub postal_code: String,

    /// Free-text delivery notes.
    pub notes: Option<String>,
}

impl CheckoutForm {
    /// Current value of a required field.
    pub fn get(&self, field: ShippingField) -> &str {
        match field {
            ShippingField::FirstName => &self.first_name,
            ShippingField::LastName => &self.last_name,
            ShippingField::Email => &self.email,
            ShippingField::Phone => &self.phone,
            ShippingField::Address => &self.address,
            ShippingField::City => &self.city,
            ShippingField::PostalCode => &self.postal_code,
        }
    }

    /// Replace the value of a required field.
    pub fn set(&mut self, field: ShippingField, value: impl Into<String>) {
        let slot = match field {
            ShippingField::FirstName => &mut self.first_name,
            ShippingField::LastName => &mut self.last_name,
            ShippingField::Email => &mut self.email,
            ShippingField::Phone => &mut self.phone,
            ShippingField::Address => &mut self.address,
            ShippingField::City => &mut self.city,
            ShippingField::PostalCode => &mut self.postal_code,
        };

        *slot = value.into();
    }

    /// Notes, when any non-blank text was entered.
    pub fn order_notes(&self) -> Option<&str> {
        self.notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
    }

    /// Required fields that are empty.
    pub fn missing_fields(&self) -> SmallVec<[ShippingField; 7]> {
        ShippingField::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_empty())
            .collect()
    }

    /// Check that every required field is filled.
    ///
    /// # Errors
    ///
    /// Returns a [`ShippingValidationError`] listing the empty fields.
    pub fn validate_shipping(&self) -> Result<(), ShippingValidationError> {
        let missing = self.missing_fields();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ShippingValidationError { missing })
        }
    }

    /// Seed identity fields from a signed-in customer.
    ///
    /// Only empty fields are filled. City and postal code have no counterpart on the
    /// customer record and are left alone.
    pub fn prefill_from(&mut self, customer: &Customer) {
        let (first_name, last_name) = customer.split_name();

        fill_blank(&mut self.first_name, Some(first_name.as_str()));
        fill_blank(&mut self.last_name, Some(last_name.as_str()));
        fill_blank(&mut self.email, Some(customer.email.as_str()));
        fill_blank(&mut self.phone, customer.contact_phone());
        fill_blank(&mut self.address, customer.address.as_deref());
    }
}

fn fill_blank(slot: &mut String, value: Option<&str>) {
    let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) else {
        return;
    };

    if slot.is_empty() {
        *slot = value.to_string();
    }
}
