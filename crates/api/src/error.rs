// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the client layer.

use crate::capabilities::GateDenial;
use quotedesk::CoreError;
use quotedesk_domain::DomainError;
use quotedesk_persistence::PersistenceError;
use std::collections::BTreeMap;
use thiserror::Error;

/// Client-level errors.
///
/// Server failures are classified by HTTP status so that callers can react
/// to each class without parsing messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// A mutating call was attempted without a cached CSRF token.
    #[error("no CSRF token is available for this session")]
    MissingCsrfToken,

    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// The session is missing or expired (401).
    #[error("not authenticated: {message}")]
    Unauthorized { message: String },

    /// The user lacks permission for the operation (403).
    #[error("forbidden: {message}")]
    Forbidden { message: String },

    /// The server rejected the request payload (400/422).
    #[error("validation failed: {message}")]
    Validation {
        message: String,
        /// Per-field messages, when the server sent an `errors` object.
        fields: BTreeMap<String, String>,
    },

    /// A payment step failed after the quote was accepted.
    #[error("payment failed: {message}")]
    Payment { message: String },

    /// The user dismissed the payment widget and the quote was released.
    #[error("payment was cancelled")]
    PaymentCancelled,

    /// The requested record does not exist (404).
    #[error("not found: {message}")]
    NotFound { message: String },

    /// Any other non-success status.
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    /// A success response could not be decoded.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// The Action Gate refused the action locally.
    #[error("action not permitted: {0}")]
    ActionDenied(GateDenial),

    /// The same action on the same record is already awaiting the server.
    #[error("{action} is already in progress for {entity_id}")]
    AlreadyInFlight { action: String, entity_id: String },

    /// A domain rule was violated before any request was sent.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The server's answer could not be applied to local state.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The session store failed.
    #[error("session storage error: {0}")]
    Storage(#[from] PersistenceError),

    /// The client configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Returns true if the user must sign in again.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Classifies a non-success HTTP status.
    #[must_use]
    pub fn from_status(status: u16, message: String, fields: BTreeMap<String, String>) -> Self {
        match status {
            401 => Self::Unauthorized { message },
            403 => Self::Forbidden { message },
            404 => Self::NotFound { message },
            400 | 422 => Self::Validation { message, fields },
            _ => Self::Server { status, message },
        }
    }

    /// A message suitable for showing to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingCsrfToken => {
                "Your session is missing a security token. Refresh your session and try again."
                    .to_string()
            }
            Self::Network(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            Self::Unauthorized { .. } => "Your session has expired. Please sign in again.".to_string(),
            Self::Forbidden { message } if !message.is_empty() => message.clone(),
            Self::Forbidden { .. } => "You do not have permission to do that.".to_string(),
            Self::Validation { message, fields } => {
                if fields.is_empty() {
                    message.clone()
                } else {
                    let details: Vec<String> =
                        fields.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                    format!("{message} ({})", details.join(", "))
                }
            }
            Self::Payment { message } => format!(
                "Payment failed: {message}. If you were charged, please contact support."
            ),
            Self::PaymentCancelled => {
                "Payment was cancelled. The quote is open for payment again.".to_string()
            }
            Self::NotFound { .. } => "That record no longer exists.".to_string(),
            Self::Server { message, .. } if !message.is_empty() => message.clone(),
            Self::Server { .. } | Self::Decode(_) => {
                "The server could not complete the request. Please try again.".to_string()
            }
            Self::ActionDenied(denial) => denial.to_string(),
            Self::AlreadyInFlight { .. } => "That action is already in progress.".to_string(),
            Self::Domain(err) => err.to_string(),
            Self::Core(_) => "Local data is out of date. Reload and try again.".to_string(),
            Self::Storage(_) => "Could not read or write the local session.".to_string(),
            Self::Config(message) => message.clone(),
        }
    }
}

impl From<GateDenial> for ApiError {
    fn from(denial: GateDenial) -> Self {
        Self::ActionDenied(denial)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}
