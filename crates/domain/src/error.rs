// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Quote status string is not one the server defines.
    InvalidQuoteStatus {
        /// The unrecognized status.
        status: String,
    },
    /// Dispute status string is not one the server defines.
    InvalidDisputeStatus {
        /// The unrecognized status.
        status: String,
    },
    /// Role string is not one of artist, customer or admin.
    InvalidRole(String),
    /// A status transition is not permitted by the lifecycle rules.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition was rejected.
        reason: String,
    },
    /// Review rating outside the 1 to 5 range.
    InvalidRating(i64),
    /// Dispute reason is empty.
    EmptyDisputeReason,
    /// Quote price is not a non-negative decimal string.
    InvalidPrice(String),
    /// Failed to parse a service date.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to parse a service time or time range.
    InvalidServiceTime {
        /// The invalid time string.
        time_string: String,
        /// Description of the problem.
        reason: String,
    },
    /// A quote record violates the customer assignment rule.
    PartyInvariantViolated {
        /// The quote identifier.
        quote_id: String,
        /// Description of the violation.
        reason: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidQuoteStatus { status } => write!(f, "Invalid quote status: {status}"),
            Self::InvalidDisputeStatus { status } => {
                write!(f, "Invalid dispute status: {status}")
            }
            Self::InvalidRole(role) => write!(f, "Invalid role: {role}"),
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot transition from {from} to {to}: {reason}")
            }
            Self::InvalidRating(rating) => {
                write!(f, "Invalid rating: {rating}. Must be between 1 and 5")
            }
            Self::EmptyDisputeReason => write!(f, "A dispute reason is required"),
            Self::InvalidPrice(price) => write!(f, "Invalid price: '{price}'"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::InvalidServiceTime {
                time_string,
                reason,
            } => {
                write!(f, "Invalid service time '{time_string}': {reason}")
            }
            Self::PartyInvariantViolated { quote_id, reason } => {
                write!(f, "Quote {quote_id} violates party invariant: {reason}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
