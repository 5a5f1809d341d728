//! Simulated checkout flow: totals, customer details, and the step machine
//! the checkout dialog walks through.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::menu::Restaurant;

/// Flat delivery fee in rupees, charged once per order.
pub const DELIVERY_FEE: i64 = 150;

/// Fixed delay of the simulated order submission.
#[cfg(feature = "async")]
pub const SUBMIT_DELAY: std::time::Duration = std::time::Duration::from_secs(3);

/// Delivery fee for a given subtotal; an empty cart is never charged.
#[must_use]
pub fn delivery_fee(subtotal: i64) -> i64 {
    if subtotal > 0 { DELIVERY_FEE } else { 0 }
}

/// Whether the subtotal clears the restaurant's minimum order amount.
#[must_use]
pub fn meets_minimum_order(restaurant: &Restaurant, subtotal: i64) -> bool {
    subtotal >= restaurant.min_order_amount
}

/// Order-level amounts derived from the cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: i64,
    pub delivery_fee: i64,
    pub total: i64,
}

impl OrderTotals {
    #[must_use]
    pub fn from_subtotal(subtotal: i64) -> Self {
        let fee = delivery_fee(subtotal);
        Self {
            subtotal,
            delivery_fee: fee,
            total: subtotal + fee,
        }
    }
}

/// Payment methods offered at checkout. All of them are simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    CashOnDelivery,
    Card,
    BankTransfer,
}

impl PaymentMethod {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::CashOnDelivery => "Cash on Delivery",
            Self::Card => "Credit/Debit Card",
            Self::BankTransfer => "Bank Transfer",
        }
    }
}

/// Customer details collected on the first checkout step.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub delivery_notes: Option<String>,
}

impl CustomerDetails {
    /// Validate the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingField`] naming the first empty
    /// required field.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let required = [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("phone", &self.phone),
            ("address", &self.address),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(CheckoutError::MissingField(name));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("required field missing: {0}")]
    MissingField(&'static str),
    #[error("an order submission is already pending")]
    SubmissionPending,
    #[error("checkout is not at the payment step")]
    NotReadyToSubmit,
}

/// The screens the checkout dialog walks through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutStep {
    #[default]
    Details,
    Payment,
    Confirming,
}

/// Confirmation returned by a successful (simulated) submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_number: String,
    pub totals: OrderTotals,
}

/// Checkout step machine. Owns the collected details and guards against
/// duplicate submission while one is in flight.
#[derive(Debug, Clone, Default)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    details: CustomerDetails,
    payment_method: PaymentMethod,
    submitting: bool,
}

impl CheckoutFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    #[must_use]
    pub fn details(&self) -> &CustomerDetails {
        &self.details
    }

    #[must_use]
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Accept the details form and advance to the payment step.
    ///
    /// # Errors
    ///
    /// Returns a validation error and stays on the details step if a required
    /// field is empty.
    pub fn submit_details(&mut self, details: CustomerDetails) -> Result<(), CheckoutError> {
        details.validate()?;
        self.details = details;
        self.step = CheckoutStep::Payment;
        Ok(())
    }

    /// Go back from payment to the details form.
    pub fn back_to_details(&mut self) {
        if self.step == CheckoutStep::Payment && !self.submitting {
            self.step = CheckoutStep::Details;
        }
    }

    pub fn choose_payment(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    /// Enter the confirming step and mark a submission in flight.
    ///
    /// # Errors
    ///
    /// Rejects the call while a submission is pending or before the payment
    /// step is reached, so the dialog cannot double-submit.
    pub fn begin_submission(&mut self) -> Result<(), CheckoutError> {
        if self.submitting {
            return Err(CheckoutError::SubmissionPending);
        }
        if self.step != CheckoutStep::Payment {
            return Err(CheckoutError::NotReadyToSubmit);
        }
        self.step = CheckoutStep::Confirming;
        self.submitting = true;
        Ok(())
    }

    /// Mark the in-flight submission as succeeded; the flow stays on the
    /// confirming step showing the confirmation.
    pub fn complete_submission(&mut self) {
        self.submitting = false;
    }

    /// Mark the in-flight submission as failed and return to the payment step
    /// so the customer can retry.
    pub fn fail_submission(&mut self) {
        self.submitting = false;
        self.step = CheckoutStep::Payment;
    }
}

/// Draw an order confirmation number such as `GS-4821`.
pub fn order_number<R: Rng>(rng: &mut R) -> String {
    format!("GS-{}", rng.gen_range(1000..=9999))
}

/// Run the simulated order submission: a fixed network-shaped delay followed
/// by an unconditional confirmation. Duplicate submissions are rejected while
/// one is pending.
///
/// # Errors
///
/// Returns an error from [`CheckoutFlow::begin_submission`]; the delay itself
/// never fails.
#[cfg(feature = "async")]
pub async fn place_order<R: Rng>(
    flow: &mut CheckoutFlow,
    totals: OrderTotals,
    rng: &mut R,
) -> Result<OrderConfirmation, CheckoutError> {
    place_order_with_delay(flow, totals, rng, SUBMIT_DELAY).await
}

/// [`place_order`] with an explicit delay, so tests can run without waiting.
///
/// # Errors
///
/// Returns an error from [`CheckoutFlow::begin_submission`].
#[cfg(feature = "async")]
pub async fn place_order_with_delay<R: Rng>(
    flow: &mut CheckoutFlow,
    totals: OrderTotals,
    rng: &mut R,
    delay: std::time::Duration,
) -> Result<OrderConfirmation, CheckoutError> {
    flow.begin_submission()?;
    tokio::time::sleep(delay).await;
    let confirmation = OrderConfirmation {
        order_number: order_number(rng),
        totals,
    };
    flow.complete_submission();
    Ok(confirmation)
}
