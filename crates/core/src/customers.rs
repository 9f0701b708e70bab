//! Customers
//!
//! Identity records exchanged with the storefront API, and local validation of the
//! registration form.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;
use zeroize::Zeroize;

/// Shortest password accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// An authenticated storefront customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Customer identifier.
    pub id: String,

    /// Full display name.
    pub name: String,

    /// Contact email.
    pub email: String,

    /// Primary phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Alternate mobile number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,

    /// Street address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Customer {
    /// Phone to contact the customer on, preferring the primary number.
    pub fn contact_phone(&self) -> Option<&str> {
        non_blank(self.phone.as_deref()).or_else(|| non_blank(self.mobile.as_deref()))
    }

    /// Split the display name into first and last name.
    ///
    /// The first whitespace-separated token is the first name; the remaining tokens,
    /// joined by single spaces, are the last name.
    pub fn split_name(&self) -> (String, String) {
        let mut parts = self.name.split_whitespace();
        let first = parts.next().unwrap_or_default().to_string();
        let last = parts.collect::<Vec<_>>().join(" ");

        (first, last)
    }
}

/// Partial profile update; absent fields are left unchanged by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdate {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// New primary phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// New mobile phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,

    /// New street address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl CustomerUpdate {
    /// Whether the update carries no changes.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A password held in memory only as long as needed.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    /// Wrap a raw password.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw password, for transport.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Number of characters in the password.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// Whether the password is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")?;
        Ok(())
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Password {}

impl Drop for Password {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl Serialize for Password {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Registration payload sent to the identity API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterData {
    /// Full display name.
    pub name: String,

    /// Login email.
    pub email: String,

    /// Optional phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Password; when present, registration is followed by an automatic login.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<Password>,
}

/// Errors raised by local registration form validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    /// A required field was left blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The password is shorter than [`MIN_PASSWORD_LENGTH`].
    #[error("password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum accepted length.
        min: usize,
    },

    /// The confirmation does not match the password.
    #[error("passwords do not match")]
    PasswordMismatch,
}

/// The registration form as entered by the customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    /// Full display name.
    pub name: String,

    /// Login email.
    pub email: String,

    /// Optional phone number.
    pub phone: Option<String>,

    /// Chosen password.
    pub password: Password,

    /// Password confirmation.
    pub confirm_password: Password,
}

impl RegistrationForm {
    /// Validate the form and build the registration payload.
    ///
    /// # Errors
    ///
    /// - [`RegistrationError::MissingField`]: name or email is blank.
    /// - [`RegistrationError::PasswordMismatch`]: the confirmation differs.
    /// - [`RegistrationError::PasswordTooShort`]: the password is too short.
    pub fn validate(&self) -> Result<RegisterData, RegistrationError> {
        if self.name.trim().is_empty() {
            return Err(RegistrationError::MissingField("name"));
        }

        if self.email.trim().is_empty() {
            return Err(RegistrationError::MissingField("email"));
        }

        if self.password != self.confirm_password {
            return Err(RegistrationError::PasswordMismatch);
        }

        if self.password.len() < MIN_PASSWORD_LENGTH {
            return Err(RegistrationError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }

        Ok(RegisterData {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: non_blank(self.phone.as_deref()).map(str::to_string),
            password: Some(self.password.clone()),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn customer(name: &str) -> Customer {
        Customer {
            id: "c-1".to_string(),
            name: name.to_string(),
            email: "ana@example.com".to_string(),
            phone: None,
            mobile: None,
            address: None,
        }
    }

    fn form(password: &str, confirm: &str) -> RegistrationForm {
        RegistrationForm {
            name: " Ana Petrovic ".to_string(),
            email: "ana@example.com".to_string(),
            phone: Some("  ".to_string()),
            password: Password::new(password),
            confirm_password: Password::new(confirm),
        }
    }

    #[test]
    fn split_name_takes_first_token_and_joins_the_rest() {
        assert_eq!(
            customer("Ana  Maria   Petrovic").split_name(),
            ("Ana".to_string(), "Maria Petrovic".to_string())
        );
        assert_eq!(
            customer("Cher").split_name(),
            ("Cher".to_string(), String::new())
        );
        assert_eq!(customer("").split_name(), (String::new(), String::new()));
    }

    #[test]
    fn contact_phone_falls_back_to_mobile() {
        let mut customer = customer("Ana");
        customer.mobile = Some("+381 64 000".to_string());

        assert_eq!(customer.contact_phone(), Some("+381 64 000"));

        customer.phone = Some("011 222".to_string());

        assert_eq!(customer.contact_phone(), Some("011 222"));
    }

    #[test]
    fn customer_deserialises_without_optional_fields() -> TestResult {
        let customer: Customer =
            serde_json::from_str(r#"{"id":"1","name":"Ana","email":"ana@example.com"}"#)?;

        assert_eq!(customer.phone, None);
        assert_eq!(customer.address, None);

        Ok(())
    }

    #[test]
    fn password_debug_is_redacted() {
        let password = Password::new("hunter22");

        assert_eq!(format!("{password:?}"), "Password(**redacted**)");
    }

    #[test]
    fn valid_form_produces_trimmed_payload() -> TestResult {
        let data = form("secret1", "secret1").validate()?;

        assert_eq!(data.name, "Ana Petrovic");
        assert_eq!(data.phone, None);
        assert_eq!(data.password, Some(Password::new("secret1")));

        let json = serde_json::to_value(&data)?;

        assert_eq!(json["password"], "secret1");
        assert!(json.get("phone").is_none());

        Ok(())
    }

    #[test]
    fn mismatched_confirmation_is_rejected() {
        assert_eq!(
            form("secret1", "secret2").validate(),
            Err(RegistrationError::PasswordMismatch)
        );
    }

    #[test]
    fn short_password_is_rejected() {
        assert_eq!(
            form("abc", "abc").validate(),
            Err(RegistrationError::PasswordTooShort { min: 6 })
        );
    }

    #[test]
    fn blank_email_is_rejected() {
        let mut form = form("secret1", "secret1");
        form.email = "  ".to_string();

        assert_eq!(
            form.validate(),
            Err(RegistrationError::MissingField("email"))
        );
    }

    #[test]
    fn empty_update_is_detected() -> TestResult {
        let update = CustomerUpdate {
            address: Some("Main St 1".to_string()),
            ..CustomerUpdate::default()
        };

        assert!(CustomerUpdate::default().is_empty());
        assert!(!update.is_empty());
        assert_eq!(
            serde_json::to_value(&update)?,
            serde_json::json!({ "address": "Main St 1" })
        );

        Ok(())
    }
}
