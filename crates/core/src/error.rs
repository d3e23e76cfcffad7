// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur while applying server results to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// No quote on the board carries this dispute.
    UnknownDispute(String),
    /// The server answered an action with a different quote than the one targeted.
    QuoteMismatch {
        /// The quote the action targeted.
        expected: String,
        /// The quote the server returned.
        actual: String,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownDispute(id) => write!(f, "Dispute {id} is not attached to a loaded quote"),
            Self::QuoteMismatch { expected, actual } => write!(
                f,
                "Server returned quote {actual} for an action on quote {expected}"
            ),
        }
    }
}

impl std::error::Error for CoreError {}
