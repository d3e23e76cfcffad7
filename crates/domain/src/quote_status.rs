// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Quote status states and lifecycle transitions.
//!
//! The server assigns quote status; the client never advances it on its
//! own. This module exists so the client can recognize a server-reported
//! change that the lifecycle does not allow and so gating code can ask
//! questions like "is this quote still open".

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Authoritative, server-assigned quote status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuoteStatus {
    /// Issued by an artist, not yet accepted by any customer.
    Pending,
    /// Accepted by a customer, payment not yet captured.
    Accepted,
    /// Payment captured; the service is booked.
    Booked,
    /// Service delivered.
    Completed,
    /// Cancelled by one of the parties.
    Cancelled,
}

impl QuoteStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Accepted,
        Self::Booked,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Returns the wire representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Booked => "Booked",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Returns true if this status is terminal (cannot transition to another state).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Returns true while the quote is still moving towards its service date.
    ///
    /// These are the statuses the display-status projector refines.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::Accepted | Self::Booked)
    }

    /// Returns true if a customer must be assigned in this status.
    #[must_use]
    pub const fn requires_customer(&self) -> bool {
        matches!(self, Self::Accepted | Self::Booked | Self::Completed)
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// The only backwards edge is `Accepted -> Pending`, which the server
    /// takes when a customer abandons payment.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "cannot transition from terminal state".to_string(),
            });
        }

        let valid = match self {
            Self::Pending => matches!(new_status, Self::Accepted | Self::Cancelled),
            Self::Accepted => matches!(
                new_status,
                Self::Booked | Self::Pending | Self::Cancelled
            ),
            Self::Booked => matches!(new_status, Self::Completed | Self::Cancelled),
            Self::Completed | Self::Cancelled => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "transition not permitted by quote lifecycle rules".to_string(),
            })
        }
    }
}

impl std::fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuoteStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Accepted" => Ok(Self::Accepted),
            "Booked" => Ok(Self::Booked),
            "Completed" => Ok(Self::Completed),
            "Cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidQuoteStatus {
                status: s.to_string(),
            }),
        }
    }
}
