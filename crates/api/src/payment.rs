// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Accept-and-pay handshake.
//!
//! Accepting a quote reserves it for the customer and opens an order with
//! the payment provider. The provider's widget then either completes, in
//! which case the payment is captured, or is dismissed or fails, in which
//! case the quote is released back to pending with `cancel-payment`.

use crate::actions::Marketplace;
use crate::error::ApiError;
use crate::request_response::{AcceptResponse, CapturePaymentRequest};
use quotedesk::{QuoteAction, TransitionResult};
use std::future::Future;
use tracing::{info, warn};

/// What the payment widget needs to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentOrder {
    pub quote_id: String,
    /// Public key of the merchant account.
    pub key_id: String,
    /// Amount in the currency's minor unit.
    pub amount: u64,
    pub currency: String,
    pub order_id: String,
    pub product_type: String,
}

impl From<&AcceptResponse> for PaymentOrder {
    fn from(accepted: &AcceptResponse) -> Self {
        Self {
            quote_id: accepted.quote.id.clone(),
            key_id: accepted.key_id.clone(),
            amount: accepted.amount,
            currency: accepted.currency.clone(),
            order_id: accepted.order_id.clone(),
            product_type: accepted.quote.product_type.clone(),
        }
    }
}

/// Proof of payment returned by the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfirmation {
    pub payment_id: String,
    pub order_id: String,
    pub signature: String,
}

impl From<PaymentConfirmation> for CapturePaymentRequest {
    fn from(confirmation: PaymentConfirmation) -> Self {
        Self {
            razorpay_payment_id: confirmation.payment_id,
            razorpay_order_id: confirmation.order_id,
            razorpay_signature: confirmation.signature,
        }
    }
}

/// How the payment widget closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Completed(PaymentConfirmation),
    /// The user closed the widget without paying.
    Dismissed,
    /// The provider reported a failure.
    Failed(String),
}

/// The external payment widget.
pub trait PaymentWidget {
    /// Opens the widget for `order` and waits until it closes.
    fn open(&self, order: &PaymentOrder) -> impl Future<Output = PaymentOutcome> + Send;
}

impl Marketplace {
    /// Accepts a pending quote and pays for it through `widget`.
    ///
    /// On success the quote is Booked. If the widget is dismissed or fails,
    /// `cancel-payment` is called exactly once, before the accept action is
    /// released, and the quote returns to Pending.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::PaymentCancelled` when the widget was dismissed and
    /// `ApiError::Payment` when it failed or the capture failed for any
    /// reason. Local refusals and a rejected accept are returned as is. An
    /// accept the board cannot apply releases the quote before its error is
    /// returned.
    pub async fn accept_and_pay<W: PaymentWidget + Sync>(
        &self,
        quote_id: &str,
        widget: &W,
    ) -> Result<TransitionResult, ApiError> {
        let action = QuoteAction::AcceptAndPay {
            quote_id: quote_id.to_string(),
        };
        let prepared = self.prepare(&action).await?;

        let accepted = match self.client.accept_quote(&prepared.csrf, quote_id).await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(quote_id, error = %e, "accept failed");
                self.note_failure(&e);
                return Err(e);
            }
        };
        let order = PaymentOrder::from(&accepted);
        // The server already holds the quote as Accepted.
        if let Err(e) = self.commit(&action, Ok(accepted.quote)).await {
            warn!(quote_id, error = %e, "accepted quote could not be applied; releasing it");
            self.release(&action, &prepared.csrf).await?;
            return Err(e);
        }
        info!(quote_id, order_id = %order.order_id, "quote accepted; awaiting payment");

        match widget.open(&order).await {
            PaymentOutcome::Completed(confirmation) => {
                let capture = CapturePaymentRequest::from(confirmation);
                let result = self
                    .client
                    .capture_payment(&prepared.csrf, quote_id, &capture)
                    .await;
                // The customer has paid by now, so every capture failure is
                // a payment failure.
                self.commit(&action, result).await.map_err(|e| {
                    warn!(quote_id, error = %e, "payment could not be captured");
                    ApiError::Payment {
                        message: format!("the payment could not be confirmed ({e})"),
                    }
                })
            }
            PaymentOutcome::Dismissed => {
                info!(quote_id, "payment dismissed; releasing quote");
                self.release(&action, &prepared.csrf).await?;
                Err(ApiError::PaymentCancelled)
            }
            PaymentOutcome::Failed(reason) => {
                warn!(quote_id, %reason, "payment failed; releasing quote");
                self.release(&action, &prepared.csrf).await?;
                Err(ApiError::Payment { message: reason })
            }
        }
    }

    /// Reverts an accepted quote to pending.
    async fn release(
        &self,
        action: &QuoteAction,
        csrf: &str,
    ) -> Result<TransitionResult, ApiError> {
        let result = self.client.cancel_payment(csrf, action.entity_id()).await;
        self.commit(action, result).await.map_err(|e| {
            warn!(quote_id = action.entity_id(), error = %e, "could not release quote");
            ApiError::Payment {
                message: format!("the quote could not be released ({})", e.user_message()),
            }
        })
    }
}
