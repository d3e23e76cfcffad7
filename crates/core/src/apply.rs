// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::QuoteAction;
use crate::error::CoreError;
use crate::state::{QuoteBoard, TransitionResult};
use quotedesk_domain::Quote;
use tracing::{debug, warn};

/// Resolves the quote an action targets on the current board.
///
/// Dispute actions are resolved through the quote that carries the dispute.
///
/// # Errors
///
/// Returns `CoreError::UnknownDispute` if a dispute action targets a
/// dispute no loaded quote carries.
pub fn target_quote_id(board: &QuoteBoard, action: &QuoteAction) -> Result<String, CoreError> {
    match action {
        QuoteAction::CloseDispute { dispute_id } | QuoteAction::DeleteDispute { dispute_id } => {
            board
                .quote_for_dispute(dispute_id)
                .map(|q| q.id.clone())
                .ok_or_else(|| CoreError::UnknownDispute(dispute_id.clone()))
        }
        _ => Ok(action.entity_id().to_string()),
    }
}

/// Applies the server's confirmation of an action to the board.
///
/// The server's representation replaces the local record wholesale,
/// nested disputes and review included. A status change the lifecycle
/// does not allow is logged but still applied, since the server is
/// authoritative.
///
/// # Errors
///
/// Returns an error if the confirmed quote is not the one the action
/// targeted, or a dispute action's dispute is not on the board.
pub fn apply(
    board: &mut QuoteBoard,
    action: &QuoteAction,
    confirmed: Quote,
) -> Result<TransitionResult, CoreError> {
    let expected = target_quote_id(board, action)?;
    if confirmed.id != expected {
        return Err(CoreError::QuoteMismatch {
            expected,
            actual: confirmed.id,
        });
    }
    Ok(apply_refreshed(board, confirmed))
}

/// Applies a quote fetched or returned outside of an action.
pub fn apply_refreshed(board: &mut QuoteBoard, confirmed: Quote) -> TransitionResult {
    if let Err(e) = confirmed.check_party_invariant() {
        warn!(quote_id = %confirmed.id, error = %e, "server returned inconsistent quote");
    }

    let quote_id = confirmed.id.clone();
    let new_status = confirmed.status;
    let previous_status = board.upsert(confirmed);

    if let Some(previous) = previous_status.filter(|p| *p != new_status) {
        if let Err(e) = previous.validate_transition(new_status) {
            warn!(quote_id = %quote_id, error = %e, "unexpected status change from server");
        }
    }

    debug!(
        quote_id = %quote_id,
        previous = ?previous_status,
        status = %new_status,
        "applied server quote"
    );

    TransitionResult {
        quote_id,
        previous_status,
        new_status,
    }
}
