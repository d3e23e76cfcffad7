// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response shapes for the marketplace REST API.

use quotedesk_domain::{Quote, Rating, Role, User};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Response of `GET /auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MeResponse {
    pub user: User,
}

/// Response of `GET /auth/csrf-token`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsrfResponse {
    pub csrf_token: String,
}

/// Request body of `PUT /auth/role`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleRequest {
    pub role: Role,
}

/// A single quote. Action endpoints wrap it as `{ "quote": ... }`; the
/// read endpoint may send it bare.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum QuoteResponse {
    Wrapped { quote: Box<Quote> },
    Bare(Box<Quote>),
}

impl QuoteResponse {
    #[must_use]
    pub fn into_quote(self) -> Quote {
        match self {
            Self::Wrapped { quote } | Self::Bare(quote) => *quote,
        }
    }
}

/// A quote list. The server sends either a bare array or `{ "quotes": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum QuoteListResponse {
    Bare(Vec<Quote>),
    Wrapped { quotes: Vec<Quote> },
}

impl QuoteListResponse {
    #[must_use]
    pub fn into_quotes(self) -> Vec<Quote> {
        match self {
            Self::Bare(quotes) | Self::Wrapped { quotes } => quotes,
        }
    }
}

/// Response of `POST /api/quotes/:id/accept`.
///
/// Carries everything the payment widget needs to open.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AcceptResponse {
    pub quote: Quote,
    pub key_id: String,
    /// Amount in the currency's minor unit.
    pub amount: u64,
    pub currency: String,
    #[serde(rename = "razorpayOrderId")]
    pub order_id: String,
}

/// Request body of `POST /api/quotes/:id/capture-payment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapturePaymentRequest {
    pub razorpay_payment_id: String,
    pub razorpay_order_id: String,
    pub razorpay_signature: String,
}

/// Request body of `POST /api/quotes/:id/dispute`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RaiseDisputeRequest {
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Request body of `POST|PUT /api/quotes/:id/review`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewRequest {
    pub rating: Rating,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// An error body. Servers use any of these fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
}

impl ErrorBody {
    /// The best human-readable message in the body.
    #[must_use]
    pub fn best_message(&self) -> Option<String> {
        self.message
            .clone()
            .or_else(|| self.error.clone())
            .filter(|m| !m.trim().is_empty())
    }

    /// Per-field messages from an `errors` object or list.
    ///
    /// Objects map field to message (or to a list of messages). Lists are
    /// keyed by position unless their items carry a `field` or `path`.
    #[must_use]
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        let mut fields = BTreeMap::new();
        match &self.errors {
            Some(serde_json::Value::Object(map)) => {
                for (field, value) in map {
                    if let Some(text) = flatten_message(value) {
                        fields.insert(field.clone(), text);
                    }
                }
            }
            Some(serde_json::Value::Array(items)) => {
                for (i, item) in items.iter().enumerate() {
                    let key = item
                        .get("field")
                        .or_else(|| item.get("path"))
                        .and_then(serde_json::Value::as_str)
                        .map_or_else(|| i.to_string(), String::from);
                    let text = item
                        .get("message")
                        .and_then(flatten_message)
                        .or_else(|| flatten_message(item));
                    if let Some(text) = text {
                        fields.insert(key, text);
                    }
                }
            }
            _ => {}
        }
        fields
    }
}

fn flatten_message(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(serde_json::Value::as_str)
                .map(String::from)
                .collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    }
}

/// Represents whether a specific action is permitted.
///
/// Serializes to JSON as true/false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(self.is_allowed())
    }
}

impl<'de> Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        bool::deserialize(deserializer).map(Self::from_bool)
    }
}

/// Quote-level controls the signed-in user may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteCapabilities {
    pub can_accept: Capability,
    pub can_complete: Capability,
    pub can_cancel: Capability,
    pub can_raise_dispute: Capability,
    pub can_submit_review: Capability,
    pub can_delete_review: Capability,
}

impl QuoteCapabilities {
    /// Every capability denied.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            can_accept: Capability::Denied,
            can_complete: Capability::Denied,
            can_cancel: Capability::Denied,
            can_raise_dispute: Capability::Denied,
            can_submit_review: Capability::Denied,
            can_delete_review: Capability::Denied,
        }
    }
}

/// Controls for a single dispute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisputeCapabilities {
    pub can_close: Capability,
    pub can_delete: Capability,
}
