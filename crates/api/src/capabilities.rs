// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The Action Gate.
//!
//! Decides which actions the signed-in user may trigger on a quote or
//! dispute. The gate is advisory: it hides controls and refuses obviously
//! invalid requests locally, but the server remains the authority.

use crate::auth::AuthenticatedActor;
use crate::request_response::{Capability, DisputeCapabilities, QuoteCapabilities};
use quotedesk::{ActionKind, QuoteAction};
use quotedesk_domain::{Dispute, DisputeStatus, Quote, QuoteStatus, Role};
use thiserror::Error;

/// Why the gate refused an action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateDenial {
    /// The user has not chosen a role.
    #[error("choose a role before acting on quotes")]
    NoRole,
    /// The user's role can never perform the action.
    #[error("{role} accounts cannot {action}")]
    NotEligible { action: &'static str, role: Role },
    /// The user is not the artist or customer on the quote.
    #[error("only a party to this quote can {action}")]
    NotParty { action: &'static str },
    /// The quote's status does not allow the action.
    #[error("cannot {action} a quote that is {status}")]
    WrongStatus {
        action: &'static str,
        status: QuoteStatus,
    },
    /// An Open or Under Review dispute blocks the action.
    #[error("dispute {dispute_id} must be settled first")]
    ActiveDispute { dispute_id: String },
    /// There is no review to delete.
    #[error("this quote has no review")]
    NoReview,
    /// Only the user who raised a dispute may close or delete it.
    #[error("only the user who raised this dispute can change it")]
    NotInitiator,
    /// The dispute's status does not allow the action.
    #[error("cannot {action} a dispute that is {status}")]
    WrongDisputeStatus {
        action: &'static str,
        status: DisputeStatus,
    },
    /// The dispute is not attached to the quote.
    #[error("dispute {0} is not attached to this quote")]
    UnknownDispute(String),
}

/// Human wording for an action, used in denial messages.
const fn describe(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::AcceptAndPay => "accept",
        ActionKind::MarkCompleted => "complete",
        ActionKind::Cancel => "cancel",
        ActionKind::RaiseDispute => "dispute",
        ActionKind::CloseDispute => "close",
        ActionKind::DeleteDispute => "delete",
        ActionKind::SubmitReview => "review",
        ActionKind::DeleteReview => "delete the review of",
    }
}

fn require_status(
    kind: ActionKind,
    quote: &Quote,
    allowed: &[QuoteStatus],
) -> Result<(), GateDenial> {
    if allowed.contains(&quote.status) {
        Ok(())
    } else {
        Err(GateDenial::WrongStatus {
            action: describe(kind),
            status: quote.status,
        })
    }
}

fn require_no_active_dispute(quote: &Quote) -> Result<(), GateDenial> {
    match quote.active_dispute() {
        Some(dispute) => Err(GateDenial::ActiveDispute {
            dispute_id: dispute.id.clone(),
        }),
        None => Ok(()),
    }
}

/// The customer on the quote, acting as a customer.
fn require_customer_party(
    kind: ActionKind,
    actor: &AuthenticatedActor,
    quote: &Quote,
) -> Result<(), GateDenial> {
    if !actor.is_customer() {
        return Err(GateDenial::NotEligible {
            action: describe(kind),
            role: actor.role,
        });
    }
    if !quote.is_customer(&actor.id) {
        return Err(GateDenial::NotParty {
            action: describe(kind),
        });
    }
    Ok(())
}

/// Checks whether `actor` may perform a quote-level action.
///
/// # Errors
///
/// Returns the first rule the action breaks. Dispute actions are
/// refused with `NotEligible`; use [`check_dispute_action`] for those.
pub fn check_quote_action(
    actor: &AuthenticatedActor,
    quote: &Quote,
    kind: ActionKind,
) -> Result<(), GateDenial> {
    let action = describe(kind);
    match kind {
        ActionKind::AcceptAndPay => {
            if !actor.is_customer() {
                return Err(GateDenial::NotEligible {
                    action,
                    role: actor.role,
                });
            }
            require_status(kind, quote, &[QuoteStatus::Pending])
        }
        ActionKind::MarkCompleted => {
            let is_party = match actor.role {
                Role::Artist => quote.is_artist(&actor.id),
                Role::Customer => quote.is_customer(&actor.id),
                Role::Admin => {
                    return Err(GateDenial::NotEligible {
                        action,
                        role: actor.role,
                    });
                }
            };
            if !is_party {
                return Err(GateDenial::NotParty { action });
            }
            require_status(kind, quote, &[QuoteStatus::Booked])?;
            require_no_active_dispute(quote)
        }
        ActionKind::Cancel => match actor.role {
            // Artist cancellation is not blocked by disputes.
            Role::Artist => {
                if !quote.is_artist(&actor.id) {
                    return Err(GateDenial::NotParty { action });
                }
                require_status(
                    kind,
                    quote,
                    &[
                        QuoteStatus::Pending,
                        QuoteStatus::Accepted,
                        QuoteStatus::Booked,
                    ],
                )
            }
            Role::Customer => {
                if !quote.is_customer(&actor.id) {
                    return Err(GateDenial::NotParty { action });
                }
                require_status(kind, quote, &[QuoteStatus::Accepted, QuoteStatus::Booked])?;
                require_no_active_dispute(quote)
            }
            Role::Admin => Err(GateDenial::NotEligible {
                action,
                role: actor.role,
            }),
        },
        ActionKind::RaiseDispute => {
            require_customer_party(kind, actor, quote)?;
            require_status(
                kind,
                quote,
                &[
                    QuoteStatus::Pending,
                    QuoteStatus::Accepted,
                    QuoteStatus::Booked,
                    QuoteStatus::Completed,
                ],
            )?;
            require_no_active_dispute(quote)
        }
        ActionKind::SubmitReview => {
            require_customer_party(kind, actor, quote)?;
            require_status(kind, quote, &[QuoteStatus::Completed])
        }
        ActionKind::DeleteReview => {
            require_customer_party(kind, actor, quote)?;
            if quote.review.is_none() {
                return Err(GateDenial::NoReview);
            }
            Ok(())
        }
        ActionKind::CloseDispute | ActionKind::DeleteDispute => Err(GateDenial::NotEligible {
            action,
            role: actor.role,
        }),
    }
}

/// Checks whether `actor` may close or delete `dispute`.
///
/// # Errors
///
/// Returns `NotInitiator` unless the actor raised the dispute, and
/// `WrongDisputeStatus` if the dispute is past the point of change.
pub fn check_dispute_action(
    actor: &AuthenticatedActor,
    dispute: &Dispute,
    kind: ActionKind,
) -> Result<(), GateDenial> {
    let action = describe(kind);
    let allowed: &[DisputeStatus] = match kind {
        ActionKind::CloseDispute => &[DisputeStatus::Open],
        ActionKind::DeleteDispute => &[DisputeStatus::Open, DisputeStatus::Closed],
        _ => {
            return Err(GateDenial::NotEligible {
                action,
                role: actor.role,
            });
        }
    };
    if !dispute.is_initiated_by(&actor.id) {
        return Err(GateDenial::NotInitiator);
    }
    if !allowed.contains(&dispute.status) {
        return Err(GateDenial::WrongDisputeStatus {
            action,
            status: dispute.status,
        });
    }
    Ok(())
}

/// Checks a full action against the quote it targets.
///
/// # Errors
///
/// Returns the gate's denial, or `UnknownDispute` if a dispute action
/// names a dispute the quote does not carry.
pub fn check_action(
    actor: &AuthenticatedActor,
    quote: &Quote,
    action: &QuoteAction,
) -> Result<(), GateDenial> {
    match action {
        QuoteAction::CloseDispute { dispute_id } | QuoteAction::DeleteDispute { dispute_id } => {
            let dispute = quote
                .dispute(dispute_id)
                .ok_or_else(|| GateDenial::UnknownDispute(dispute_id.clone()))?;
            check_dispute_action(actor, dispute, action.kind())
        }
        _ => check_quote_action(actor, quote, action.kind()),
    }
}

fn capability(actor: &AuthenticatedActor, quote: &Quote, kind: ActionKind) -> Capability {
    Capability::from_bool(check_quote_action(actor, quote, kind).is_ok())
}

/// Computes which quote-level controls to show.
///
/// Users without a role have no capabilities.
#[must_use]
pub fn compute_quote_capabilities(
    actor: Option<&AuthenticatedActor>,
    quote: &Quote,
) -> QuoteCapabilities {
    let Some(actor) = actor else {
        return QuoteCapabilities::none();
    };

    QuoteCapabilities {
        can_accept: capability(actor, quote, ActionKind::AcceptAndPay),
        can_complete: capability(actor, quote, ActionKind::MarkCompleted),
        can_cancel: capability(actor, quote, ActionKind::Cancel),
        can_raise_dispute: capability(actor, quote, ActionKind::RaiseDispute),
        can_submit_review: capability(actor, quote, ActionKind::SubmitReview),
        can_delete_review: capability(actor, quote, ActionKind::DeleteReview),
    }
}

/// Computes which controls to show for one dispute.
#[must_use]
pub fn compute_dispute_capabilities(
    actor: Option<&AuthenticatedActor>,
    dispute: &Dispute,
) -> DisputeCapabilities {
    let Some(actor) = actor else {
        return DisputeCapabilities {
            can_close: Capability::Denied,
            can_delete: Capability::Denied,
        };
    };

    DisputeCapabilities {
        can_close: Capability::from_bool(
            check_dispute_action(actor, dispute, ActionKind::CloseDispute).is_ok(),
        ),
        can_delete: Capability::from_bool(
            check_dispute_action(actor, dispute, ActionKind::DeleteDispute).is_ok(),
        ),
    }
}
