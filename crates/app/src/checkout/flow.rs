//! Checkout flow.

use std::{fmt, sync::Arc};

use jiff::Timestamp;
use storefront::prelude::{
    CartItem, CheckoutForm, CheckoutStep, CheckoutWizard, DiscountRule, LineAnnotation,
    OrderRecord, OrderSubmission, PricingError, PricingSnapshot, ShippingPolicy, annotate,
    generate_order_number, price_cart,
};
use tracing::{debug, error, info, warn};

use crate::{
    api::{OrdersApi, models::PlacedOrder},
    cart::CartStore,
    checkout::CheckoutError,
    navigation::Route,
    session::SessionState,
    storage::{KeyValueStore, write_record},
};

/// Shown when the order API gives no message of its own.
pub const GENERIC_ORDER_ERROR: &str = "Failed to place order. Please try again.";

/// Collaborators and settings a checkout runs against.
#[derive(Clone)]
pub struct CheckoutServices {
    pub orders: Arc<dyn OrdersApi>,
    pub cart: Arc<dyn CartStore>,
    pub store: Arc<dyn KeyValueStore>,
    pub policy: ShippingPolicy,
    pub rules: Vec<DiscountRule>,
}

/// Result of entering the checkout.
#[derive(Debug)]
pub enum CheckoutEntry {
    /// Nothing to check out; go here instead.
    Redirect(Route),

    /// The checkout is ready on the shipping step.
    Ready(Box<CheckoutFlow>),
}

/// One checkout, from entry to order confirmation.
pub struct CheckoutFlow {
    services: CheckoutServices,
    items: Vec<CartItem>,
    wizard: CheckoutWizard,
    is_submitting: bool,
    error: Option<String>,
}

impl CheckoutFlow {
    /// Enter the checkout. An empty cart redirects to the cart.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart cannot be read.
    pub fn mount(
        services: CheckoutServices,
        session: &SessionState,
    ) -> Result<CheckoutEntry, CheckoutError> {
        let items = services.cart.get_cart()?;

        if items.is_empty() {
            debug!("checkout entered with an empty cart");
            return Ok(CheckoutEntry::Redirect(Route::Cart));
        }

        let mut flow = Self {
            services,
            items,
            wizard: CheckoutWizard::new(),
            is_submitting: false,
            error: None,
        };

        flow.sync_session(session);

        Ok(CheckoutEntry::Ready(Box::new(flow)))
    }

    /// Seed the form from the signed-in customer. Only the first call with an
    /// authenticated session has any effect.
    pub fn sync_session(&mut self, session: &SessionState) -> bool {
        match &session.user {
            Some(user) if session.is_authenticated => self.wizard.prefill_once(user),
            _ => false,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn step(&self) -> CheckoutStep {
        self.wizard.step()
    }

    #[must_use]
    pub fn form(&self) -> &CheckoutForm {
        self.wizard.form()
    }

    pub fn form_mut(&mut self) -> &mut CheckoutForm {
        self.wizard.form_mut()
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Message to show the customer, if the last action failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Price the current cart.
    ///
    /// # Errors
    ///
    /// Returns an error when an amount overflows.
    pub fn pricing(&self) -> Result<PricingSnapshot, PricingError> {
        price_cart(&self.items, &self.services.policy)
    }

    /// Promotional badges per cart line. Badges never change pricing.
    #[must_use]
    pub fn annotations(&self) -> Vec<LineAnnotation<'_>> {
        annotate(&self.items, &self.services.rules)
    }

    /// Re-read the cart. Returns a redirect when the cart has been emptied.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart cannot be read.
    pub fn reload_cart(&mut self) -> Result<Option<Route>, CheckoutError> {
        self.items = self.services.cart.get_cart()?;

        Ok(self.items.is_empty().then_some(Route::Cart))
    }

    /// Validate shipping details and move to the payment step.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Validation`] and stays on the shipping step when a
    /// required field is blank.
    pub fn continue_to_payment(&mut self) -> Result<CheckoutStep, CheckoutError> {
        match self.wizard.continue_to_payment() {
            Ok(step) => {
                self.error = None;
                Ok(step)
            }
            Err(error) => {
                self.error = Some(error.to_string());
                Err(error.into())
            }
        }
    }

    /// Go back to the shipping step, keeping the form.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::SubmissionInFlight`] while an order is being
    /// placed.
    pub fn back_to_shipping(&mut self) -> Result<CheckoutStep, CheckoutError> {
        if self.is_submitting {
            return Err(CheckoutError::SubmissionInFlight);
        }

        Ok(self.wizard.back_to_shipping())
    }

    /// Place a pay-on-delivery order through the guest order endpoint.
    ///
    /// On success the order is remembered as the last order, the cart is cleared
    /// and the confirmation route is returned. On failure the flow stays on the
    /// payment step with the form and cart untouched, and may be retried.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::NotOnPaymentStep`]: shipping details were not confirmed.
    /// - [`CheckoutError::SubmissionInFlight`]: an order is already being placed.
    /// - [`CheckoutError::Submission`]: the order API refused the order.
    pub async fn place_order(&mut self) -> Result<Route, CheckoutError> {
        if self.is_submitting {
            return Err(CheckoutError::SubmissionInFlight);
        }

        if self.wizard.step() != CheckoutStep::Payment {
            return Err(CheckoutError::NotOnPaymentStep);
        }

        if self.items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        self.wizard.form().validate_shipping()?;

        let pricing = self.pricing()?;
        let submission = OrderSubmission::assemble(&self.items, self.wizard.form(), &pricing);

        self.error = None;

        debug!(lines = submission.items.len(), total = submission.total, "placing guest order");

        let submitting = Submitting::begin(&mut self.is_submitting);
        let result = self.services.orders.create_guest_order(&submission).await;
        drop(submitting);

        match result {
            Ok(placed) => Ok(self.complete(submission, placed)),
            Err(source) => {
                let message = source.message().unwrap_or(GENERIC_ORDER_ERROR).to_string();

                warn!(error = %source, "order submission failed");

                self.error = Some(message.clone());

                Err(CheckoutError::Submission { message, source })
            }
        }
    }

    fn complete(&mut self, submission: OrderSubmission, placed: PlacedOrder) -> Route {
        let placed_at = Timestamp::now();
        let order_number = placed
            .order_number
            .filter(|number| !number.trim().is_empty())
            .unwrap_or_else(|| generate_order_number(placed_at));

        let record = OrderRecord::from_submission(
            submission,
            placed.id,
            order_number.clone(),
            placed_at,
            placed.status.unwrap_or_default(),
        );

        if let Err(error) = write_record(self.services.store.as_ref(), &record) {
            error!(error = %error, order_number = %order_number, "failed to remember placed order");
        }

        if let Err(error) = self.services.cart.clear_cart() {
            error!(error = %error, order_number = %order_number, "failed to clear cart after order");
        }

        self.items.clear();

        info!(order_number = %order_number, "order placed");

        Route::OrderConfirmation { order_number }
    }
}

/// Holds the in-flight flag for one submission and clears it on drop, including
/// when the submitting future is cancelled mid-request.
struct Submitting<'a>(&'a mut bool);

impl<'a> Submitting<'a> {
    fn begin(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for Submitting<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

impl fmt::Debug for CheckoutFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutFlow")
            .field("items", &self.items)
            .field("wizard", &self.wizard)
            .field("is_submitting", &self.is_submitting)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
