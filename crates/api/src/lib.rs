// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod actions;
mod auth;
mod capabilities;
mod client;
mod config;
mod error;
mod payment;
mod request_response;
mod session;

#[cfg(test)]
mod tests;

pub use actions::Marketplace;
pub use auth::{AuthenticatedActor, authorize_role_assignment, sanitize_image_url, sanitize_user};
pub use capabilities::{
    GateDenial, check_action, check_dispute_action, check_quote_action,
    compute_dispute_capabilities, compute_quote_capabilities,
};
pub use client::{ApiClient, CSRF_HEADER};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_SESSION_TTL, DEFAULT_TIMEOUT};
pub use error::ApiError;
pub use payment::{PaymentConfirmation, PaymentOrder, PaymentOutcome, PaymentWidget};
pub use request_response::{
    AcceptResponse, Capability, CapturePaymentRequest, CsrfResponse, DisputeCapabilities,
    ErrorBody, MeResponse, QuoteCapabilities, QuoteListResponse, QuoteResponse,
    RaiseDisputeRequest, ReviewRequest, RoleRequest,
};
pub use session::{CacheEntry, SESSION_KEY, Session, SessionCache, is_valid};
