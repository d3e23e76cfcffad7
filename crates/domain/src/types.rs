// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::dispute_status::DisputeStatus;
use crate::error::DomainError;
use crate::quote_status::QuoteStatus;
use crate::validation::parse_service_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Marketplace roles.
///
/// A user without a role has signed up but not yet chosen one; such a
/// user is represented as `Option<Role>::None` on [`User`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Service provider who issues quotes.
    Artist,
    /// Buyer who accepts, pays for and reviews quotes.
    Customer,
    /// Platform operator overseeing disputes.
    Admin,
}

impl Role {
    /// Returns the wire representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Artist => "artist",
            Self::Customer => "customer",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "artist" => Ok(Self::Artist),
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

/// The authenticated user as reported by `/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    /// Profile image. May be an absolute URL or an inline `data:` URI.
    #[serde(default, rename = "image")]
    pub image_url: Option<String>,
}

impl User {
    /// Returns a name suitable for display, falling back to the email and then the id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
    }
}

/// A short description of a party attached to quote and dispute records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartySummary {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// A review rating, always within 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest permitted rating.
    pub const MIN: u8 = 1;
    /// Highest permitted rating.
    pub const MAX: u8 = 5;

    /// Creates a rating.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRating` outside 1 to 5.
    pub fn new(value: i64) -> Result<Self, DomainError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(DomainError::InvalidRating(value))
    }

    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// A customer's review of a completed quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub rating: Rating,
    #[serde(default)]
    pub comment: Option<String>,
}

/// A dispute raised against a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dispute {
    pub id: String,
    #[serde(default)]
    pub quote_id: Option<String>,
    pub reason: String,
    #[serde(default)]
    pub details: Option<String>,
    pub status: DisputeStatus,
    /// Set by an admin when the dispute is resolved.
    #[serde(default)]
    pub resolution: Option<String>,
    pub initiator_id: String,
    pub initiator_role: Role,
    #[serde(default)]
    pub involved_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Dispute {
    /// Returns true if `user_id` raised this dispute.
    #[must_use]
    pub fn is_initiated_by(&self, user_id: &str) -> bool {
        self.initiator_id == user_id
    }
}

/// Quote fields embedded in a dispute detail response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    pub id: String,
    #[serde(default)]
    pub product_type: Option<String>,
    pub status: QuoteStatus,
    #[serde(default)]
    pub service_date: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
}

/// A dispute together with its quote and both parties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisputeDetail {
    #[serde(flatten)]
    pub dispute: Dispute,
    #[serde(default)]
    pub quote: Option<QuoteSummary>,
    #[serde(default)]
    pub initiator: Option<PartySummary>,
    #[serde(default)]
    pub involved: Option<PartySummary>,
}

/// A booking or estimate between one artist and at most one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: String,
    pub artist_id: String,
    /// Unset until a customer accepts.
    #[serde(default)]
    pub customer_id: Option<String>,
    pub product_type: String,
    #[serde(default)]
    pub details: String,
    /// Decimal string as sent by the server.
    #[serde(default)]
    pub price: Option<String>,
    /// Raw calendar date; see [`Quote::service_day`].
    pub service_date: String,
    /// Free text or an `HH:MM` / `HH:MM-HH:MM` range.
    #[serde(default)]
    pub service_time: Option<String>,
    pub status: QuoteStatus,
    #[serde(default)]
    pub review: Option<Review>,
    #[serde(default)]
    pub disputes: Vec<Dispute>,
    #[serde(default)]
    pub artist: Option<PartySummary>,
    #[serde(default)]
    pub customer: Option<PartySummary>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Quote {
    /// The service date, or `None` when the server sent something unparseable.
    #[must_use]
    pub fn service_day(&self) -> Option<NaiveDate> {
        parse_service_date(&self.service_date).ok()
    }

    #[must_use]
    pub fn is_artist(&self, user_id: &str) -> bool {
        self.artist_id == user_id
    }

    #[must_use]
    pub fn is_customer(&self, user_id: &str) -> bool {
        self.customer_id.as_deref() == Some(user_id)
    }

    /// The first Open or Under Review dispute, if any.
    #[must_use]
    pub fn active_dispute(&self) -> Option<&Dispute> {
        self.disputes.iter().find(|d| d.status.is_active())
    }

    #[must_use]
    pub fn has_active_dispute(&self) -> bool {
        self.active_dispute().is_some()
    }

    #[must_use]
    pub fn dispute(&self, dispute_id: &str) -> Option<&Dispute> {
        self.disputes.iter().find(|d| d.id == dispute_id)
    }

    /// Checks that a customer is assigned whenever the status requires one.
    ///
    /// A pending quote may still carry the customer who abandoned payment.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PartyInvariantViolated` when the record is inconsistent.
    pub fn check_party_invariant(&self) -> Result<(), DomainError> {
        if self.customer_id.is_none() && self.status.requires_customer() {
            return Err(DomainError::PartyInvariantViolated {
                quote_id: self.id.clone(),
                reason: format!("status {} requires an assigned customer", self.status),
            });
        }
        Ok(())
    }
}
