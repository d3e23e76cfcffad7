// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dispute status states and transitions.
//!
//! Disputes move `Open -> Under Review -> Resolved | Closed`, or straight
//! from `Open` to `Closed`. Only `Open -> Closed` is ever requested by the
//! client (the initiator closing their own dispute); every other edge is
//! driven by the server or an admin and is only observed after a refetch.
//! Deletion is not a transition.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Status of a dispute attached to a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisputeStatus {
    /// Raised and awaiting attention.
    Open,
    /// Taken up by an admin.
    #[serde(rename = "Under Review")]
    UnderReview,
    /// Settled by an admin, with a resolution.
    Resolved,
    /// Closed by the initiator or an admin.
    Closed,
}

impl DisputeStatus {
    /// All dispute statuses.
    pub const ALL: [Self; 4] = [Self::Open, Self::UnderReview, Self::Resolved, Self::Closed];

    /// Returns the wire representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::UnderReview => "Under Review",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
        }
    }

    /// An active dispute blocks completion, customer cancellation and new disputes.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Open | Self::UnderReview)
    }

    /// Returns true if no further transition is possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }

    /// Returns true if the initiator may delete a dispute in this status.
    #[must_use]
    pub const fn is_deletable(&self) -> bool {
        matches!(self, Self::Open | Self::Closed)
    }

    /// Validates a transition observed from the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the lifecycle does not contain the edge.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        let valid = matches!(
            (self, new_status),
            (Self::Open, Self::UnderReview | Self::Closed)
                | (Self::UnderReview, Self::Resolved | Self::Closed)
        );

        if valid {
            Ok(())
        } else {
            Err(self.rejected(new_status, "transition not permitted by dispute lifecycle rules"))
        }
    }

    /// Validates a transition the client itself wants to request.
    ///
    /// The client may only close an open dispute.
    ///
    /// # Errors
    ///
    /// Returns an error for every other edge.
    pub fn validate_client_transition(&self, new_status: Self) -> Result<(), DomainError> {
        match (self, new_status) {
            (Self::Open, Self::Closed) => Ok(()),
            (_, Self::UnderReview | Self::Resolved) => {
                Err(self.rejected(new_status, "only the server may move a dispute to this status"))
            }
            _ => Err(self.rejected(new_status, "only open disputes can be closed")),
        }
    }

    fn rejected(self, to: Self, reason: &str) -> DomainError {
        DomainError::InvalidStatusTransition {
            from: self.as_str().to_string(),
            to: to.as_str().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl std::fmt::Display for DisputeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisputeStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open" => Ok(Self::Open),
            "Under Review" => Ok(Self::UnderReview),
            "Resolved" => Ok(Self::Resolved),
            "Closed" => Ok(Self::Closed),
            _ => Err(DomainError::InvalidDisputeStatus {
                status: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_active_states() {
        assert!(DisputeStatus::Open.is_active());
        assert!(DisputeStatus::UnderReview.is_active());
        assert!(!DisputeStatus::Resolved.is_active());
        assert!(!DisputeStatus::Closed.is_active());
    }

    #[test]
    fn test_deletable_states() {
        assert!(DisputeStatus::Open.is_deletable());
        assert!(DisputeStatus::Closed.is_deletable());
        assert!(!DisputeStatus::UnderReview.is_deletable());
        assert!(!DisputeStatus::Resolved.is_deletable());
    }

    #[test]
    fn test_server_transitions() {
        let open = DisputeStatus::Open;
        assert!(open.validate_transition(DisputeStatus::UnderReview).is_ok());
        assert!(open.validate_transition(DisputeStatus::Closed).is_ok());
        assert!(open.validate_transition(DisputeStatus::Resolved).is_err());

        let review = DisputeStatus::UnderReview;
        assert!(review.validate_transition(DisputeStatus::Resolved).is_ok());
        assert!(review.validate_transition(DisputeStatus::Closed).is_ok());
        assert!(review.validate_transition(DisputeStatus::Open).is_err());
    }

    #[test]
    fn test_no_transitions_from_terminal_states() {
        for terminal in [DisputeStatus::Resolved, DisputeStatus::Closed] {
            for target in DisputeStatus::ALL {
                assert!(terminal.validate_transition(target).is_err());
            }
        }
    }

    #[test]
    fn test_client_may_only_close_open_disputes() {
        assert!(
            DisputeStatus::Open
                .validate_client_transition(DisputeStatus::Closed)
                .is_ok()
        );
        assert!(
            DisputeStatus::UnderReview
                .validate_client_transition(DisputeStatus::Closed)
                .is_err()
        );
        assert!(
            DisputeStatus::Open
                .validate_client_transition(DisputeStatus::UnderReview)
                .is_err()
        );
        assert!(
            DisputeStatus::UnderReview
                .validate_client_transition(DisputeStatus::Resolved)
                .is_err()
        );
    }

    #[test]
    fn test_under_review_wire_name() {
        let json = serde_json::to_string(&DisputeStatus::UnderReview).unwrap();
        assert_eq!(json, "\"Under Review\"");
        assert_eq!(
            "Under Review".parse::<DisputeStatus>().unwrap(),
            DisputeStatus::UnderReview
        );
        assert!("UnderReview".parse::<DisputeStatus>().is_err());
    }
}
