// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Terminal stand-in for the hosted payment widget.
//!
//! The user pays in the provider's checkout page, then pastes the payment
//! id and signature the provider shows. A blank payment id dismisses the
//! widget.

use quotedesk_api::{PaymentConfirmation, PaymentOrder, PaymentOutcome, PaymentWidget};
use std::future::Future;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[derive(Debug, Default)]
pub struct TerminalWidget;

/// Formats an amount given in minor units, e.g. `45000 INR` as `450.00 INR`.
pub fn format_amount(amount: u64, currency: &str) -> String {
    format!("{}.{:02} {currency}", amount / 100, amount % 100)
}

/// Turns the two pasted answers into an outcome.
pub fn outcome_from_input(
    order: &PaymentOrder,
    payment_id: &str,
    signature: &str,
) -> PaymentOutcome {
    let payment_id = payment_id.trim();
    let signature = signature.trim();
    if payment_id.is_empty() {
        return PaymentOutcome::Dismissed;
    }
    if signature.is_empty() {
        return PaymentOutcome::Failed(String::from("no payment signature was provided"));
    }
    PaymentOutcome::Completed(PaymentConfirmation {
        payment_id: payment_id.to_string(),
        order_id: order.order_id.clone(),
        signature: signature.to_string(),
    })
}

async fn prompt<R>(lines: &mut tokio::io::Lines<R>, label: &str) -> std::io::Result<String>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    let mut stdout = tokio::io::stdout();
    stdout.write_all(label.as_bytes()).await?;
    stdout.flush().await?;
    Ok(lines.next_line().await?.unwrap_or_default())
}

impl PaymentWidget for TerminalWidget {
    fn open(&self, order: &PaymentOrder) -> impl Future<Output = PaymentOutcome> + Send {
        let order = order.clone();
        async move {
            println!(
                "Pay {} for \"{}\" (order {}, merchant key {}).",
                format_amount(order.amount, &order.currency),
                order.product_type,
                order.order_id,
                order.key_id
            );
            let mut lines = BufReader::new(tokio::io::stdin()).lines();

            let payment_id = match prompt(&mut lines, "Payment id (blank to cancel): ").await {
                Ok(answer) => answer,
                Err(e) => return PaymentOutcome::Failed(e.to_string()),
            };
            if payment_id.trim().is_empty() {
                return PaymentOutcome::Dismissed;
            }
            let signature = match prompt(&mut lines, "Payment signature: ").await {
                Ok(answer) => answer,
                Err(e) => return PaymentOutcome::Failed(e.to_string()),
            };
            outcome_from_input(&order, &payment_id, &signature)
        }
    }
}
