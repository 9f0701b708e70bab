//! Checkout steps.

use std::fmt;

use crate::{
    checkout::{CheckoutForm, ShippingValidationError},
    customers::Customer,
};

/// Position in the checkout wizard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckoutStep {
    /// Contact and shipping details.
    #[default]
    Shipping = 1,

    /// Review and pay on delivery.
    Payment = 2,
}

impl CheckoutStep {
    /// One-based step number shown to the customer.
    pub const fn number(self) -> u8 {
        match self {
            Self::Shipping => 1,
            Self::Payment => 2,
        }
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shipping => f.write_str("shipping"),
            Self::Payment => f.write_str("payment"),
        }
    }
}

/// Form data plus the current step.
///
/// The step only moves forward through [`CheckoutWizard::continue_to_payment`] and only
/// back through [`CheckoutWizard::back_to_shipping`]; neither touches the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutWizard {
    step: CheckoutStep,
    form: CheckoutForm,
    prefilled: bool,
}

impl CheckoutWizard {
    /// Start a wizard on the shipping step with an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step.
    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Entered form data.
    pub fn form(&self) -> &CheckoutForm {
        &self.form
    }

    /// Mutable form data, for field edits.
    pub fn form_mut(&mut self) -> &mut CheckoutForm {
        &mut self.form
    }

    /// Seed the form from a signed-in customer, at most once per wizard.
    ///
    /// Returns `true` when the form was seeded by this call.
    pub fn prefill_once(&mut self, customer: &Customer) -> bool {
        if self.prefilled {
            return false;
        }

        self.form.prefill_from(customer);
        self.prefilled = true;

        true
    }

    /// Validate the shipping step and advance to payment.
    ///
    /// Calling this on the payment step re-validates and stays put.
    ///
    /// # Errors
    ///
    /// Returns a [`ShippingValidationError`] and leaves the step unchanged when a
    /// required field is blank.
    pub fn continue_to_payment(&mut self) -> Result<CheckoutStep, ShippingValidationError> {
        self.form.validate_shipping()?;
        self.step = CheckoutStep::Payment;

        Ok(self.step)
    }

    /// Return to the shipping step, keeping every entered value.
    pub fn back_to_shipping(&mut self) -> CheckoutStep {
        self.step = CheckoutStep::Shipping;
        self.step
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::checkout::ShippingField;

    use super::*;

    fn filled_wizard() -> CheckoutWizard {
        let mut wizard = CheckoutWizard::new();
        let form = wizard.form_mut();

        form.first_name = "Ana".to_string();
        form.last_name = "Petrovic".to_string();
        form.email = "ana@example.com".to_string();
        form.phone = "+381 64 000".to_string();
        form.address = "Main St 1".to_string();
        form.city = "Belgrade".to_string();
        form.postal_code = "11000".to_string();

        wizard
    }

    #[test]
    fn steps_are_numbered_from_one() {
        assert_eq!(CheckoutStep::Shipping.number(), 1);
        assert_eq!(CheckoutStep::Payment.number(), 2);
        assert_eq!(CheckoutWizard::new().step(), CheckoutStep::Shipping);
    }

    #[test]
    fn complete_form_advances_exactly_one_step() -> TestResult {
        let mut wizard = filled_wizard();

        assert_eq!(wizard.continue_to_payment()?, CheckoutStep::Payment);
        assert_eq!(wizard.continue_to_payment()?, CheckoutStep::Payment);

        Ok(())
    }

    #[test]
    fn missing_postal_code_keeps_shipping_step() {
        let mut wizard = filled_wizard();
        wizard.form_mut().set(ShippingField::PostalCode, "");

        let result = wizard.continue_to_payment();

        assert!(result.is_err(), "blank postal code must refuse the transition");
        assert_eq!(wizard.step(), CheckoutStep::Shipping);
        assert_eq!(wizard.step().number(), 1);
    }

    #[test]
    fn back_navigation_preserves_form() -> TestResult {
        let mut wizard = filled_wizard();
        wizard.form_mut().notes = Some("leave at door".to_string());
        wizard.continue_to_payment()?;

        let before = wizard.form().clone();

        assert_eq!(wizard.back_to_shipping(), CheckoutStep::Shipping);
        assert_eq!(wizard.form(), &before);

        Ok(())
    }

    #[test]
    fn prefill_happens_once() {
        let mut wizard = CheckoutWizard::new();
        let customer = Customer {
            id: "c-1".to_string(),
            name: "Ana Petrovic".to_string(),
            email: "ana@example.com".to_string(),
            phone: Some("011 222".to_string()),
            mobile: None,
            address: None,
        };

        assert!(wizard.prefill_once(&customer));

        wizard.form_mut().first_name.clear();

        assert!(!wizard.prefill_once(&customer));
        assert!(wizard.form().first_name.is_empty());
        assert_eq!(wizard.form().phone, "011 222");
    }
}
