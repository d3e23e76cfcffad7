// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use quotedesk_domain::Rating;
use serde::{Deserialize, Serialize};

/// The kind of a user-triggered action, without its payload.
///
/// Together with an entity id this identifies an in-flight operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    AcceptAndPay,
    MarkCompleted,
    Cancel,
    RaiseDispute,
    CloseDispute,
    DeleteDispute,
    SubmitReview,
    DeleteReview,
}

impl ActionKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AcceptAndPay => "accept_and_pay",
            Self::MarkCompleted => "mark_completed",
            Self::Cancel => "cancel",
            Self::RaiseDispute => "raise_dispute",
            Self::CloseDispute => "close_dispute",
            Self::DeleteDispute => "delete_dispute",
            Self::SubmitReview => "submit_review",
            Self::DeleteReview => "delete_review",
        }
    }

    /// Returns true if the action targets a dispute rather than a quote.
    #[must_use]
    pub const fn targets_dispute(&self) -> bool {
        matches!(self, Self::CloseDispute | Self::DeleteDispute)
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-triggered action, as data only.
///
/// Actions never change local state directly. They are sent to the server,
/// and only the quote the server returns is applied to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteAction {
    /// Accept a pending quote and pay for it.
    AcceptAndPay { quote_id: String },
    /// Mark a booked quote as completed.
    MarkCompleted { quote_id: String },
    /// Cancel an open quote.
    Cancel { quote_id: String },
    /// Raise a dispute against a quote.
    RaiseDispute {
        quote_id: String,
        reason: String,
        details: Option<String>,
    },
    /// Close an open dispute.
    CloseDispute { dispute_id: String },
    /// Delete an open or closed dispute.
    DeleteDispute { dispute_id: String },
    /// Create or update the review of a completed quote.
    SubmitReview {
        quote_id: String,
        rating: Rating,
        comment: Option<String>,
    },
    /// Delete the review of a quote.
    DeleteReview { quote_id: String },
}

impl QuoteAction {
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::AcceptAndPay { .. } => ActionKind::AcceptAndPay,
            Self::MarkCompleted { .. } => ActionKind::MarkCompleted,
            Self::Cancel { .. } => ActionKind::Cancel,
            Self::RaiseDispute { .. } => ActionKind::RaiseDispute,
            Self::CloseDispute { .. } => ActionKind::CloseDispute,
            Self::DeleteDispute { .. } => ActionKind::DeleteDispute,
            Self::SubmitReview { .. } => ActionKind::SubmitReview,
            Self::DeleteReview { .. } => ActionKind::DeleteReview,
        }
    }

    /// The quote or dispute id the action targets.
    #[must_use]
    pub fn entity_id(&self) -> &str {
        match self {
            Self::AcceptAndPay { quote_id }
            | Self::MarkCompleted { quote_id }
            | Self::Cancel { quote_id }
            | Self::RaiseDispute { quote_id, .. }
            | Self::SubmitReview { quote_id, .. }
            | Self::DeleteReview { quote_id } => quote_id,
            Self::CloseDispute { dispute_id } | Self::DeleteDispute { dispute_id } => dispute_id,
        }
    }
}
