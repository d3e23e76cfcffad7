// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The marketplace client: quote actions end to end.
//!
//! Every mutating action goes through the same steps:
//!
//! 1. claim the in-flight slot for `(action, entity)`
//! 2. read the CSRF token from the session cache, refusing if absent
//! 3. evaluate the Action Gate against the loaded quote
//! 4. send the request
//! 5. apply the server's quote to the board
//!
//! A failure at any step leaves the board untouched.

use crate::auth::{AuthenticatedActor, authorize_role_assignment};
use crate::capabilities::{
    check_action, compute_dispute_capabilities, compute_quote_capabilities,
};
use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::request_response::{
    DisputeCapabilities, QuoteCapabilities, RaiseDisputeRequest, ReviewRequest,
};
use crate::session::{Session, SessionCache};
use quotedesk::{
    InFlightGuard, InFlightGuards, InFlightKey, QuoteAction, QuoteBoard, TransitionResult, apply,
    apply_refreshed,
};
use quotedesk_domain::{DisputeDetail, Quote, Rating, Role, User, validate_dispute_reason};
use quotedesk_persistence::SessionStorage;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// A claimed action, ready to send.
pub(crate) struct Prepared {
    pub(crate) csrf: String,
    /// Released when the action finishes, whatever the outcome.
    _guard: InFlightGuard,
}

/// Client for one signed-in user against one server.
#[derive(Debug)]
pub struct Marketplace {
    pub(crate) client: ApiClient,
    session: SessionCache,
    board: Mutex<QuoteBoard>,
    in_flight: InFlightGuards,
}

impl Marketplace {
    /// Creates a client with its session cached in `storage`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the HTTP client cannot be built.
    pub fn new(config: ClientConfig, storage: Arc<dyn SessionStorage>) -> Result<Self, ApiError> {
        let client = ApiClient::new(config)?;
        let session = SessionCache::new(storage, client.clone());
        Ok(Self {
            client,
            session,
            board: Mutex::new(QuoteBoard::new()),
            in_flight: InFlightGuards::new(),
        })
    }

    #[must_use]
    pub const fn session(&self) -> &SessionCache {
        &self.session
    }

    #[must_use]
    pub const fn in_flight(&self) -> &InFlightGuards {
        &self.in_flight
    }

    /// A copy of the current board.
    pub async fn board(&self) -> QuoteBoard {
        self.board.lock().await.clone()
    }

    /// The signed-in user, refreshing the cache on a miss.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` if nobody is signed in.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.session.current().await.map(|s| s.user)
    }

    /// Chooses the user's role, then refetches the user.
    ///
    /// # Errors
    ///
    /// Refuses admin and missing CSRF tokens locally; otherwise returns the
    /// server's rejection.
    pub async fn set_role(&self, role: Role) -> Result<User, ApiError> {
        authorize_role_assignment(role)?;
        let session = self.session.current().await?;
        let csrf = session.csrf_token.ok_or(ApiError::MissingCsrfToken)?;

        self.client.set_role(&csrf, role).await?;
        self.session.mark_role_changed()?;
        info!(role = %role, "role assigned");

        self.session
            .refresh(true)
            .await?
            .map(|s| s.user)
            .ok_or_else(|| ApiError::Unauthorized {
                message: String::from("session ended after role change"),
            })
    }

    /// Loads the dashboard list for `role`, replacing the board.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection; the board is left as it was.
    pub async fn load_quotes(&self, role: Role) -> Result<QuoteBoard, ApiError> {
        let quotes = self
            .client
            .list_quotes(role)
            .await
            .inspect_err(|e| self.note_failure(e))?;
        let mut board = self.board.lock().await;
        board.reload(quotes);
        info!(role = %role, count = board.len(), "quotes loaded");
        Ok(board.clone())
    }

    /// Fetches one quote and merges it into the board.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection.
    pub async fn load_quote(&self, quote_id: &str) -> Result<Quote, ApiError> {
        let quote = self
            .client
            .get_quote(quote_id)
            .await
            .inspect_err(|e| self.note_failure(e))?;
        apply_refreshed(&mut *self.board.lock().await, quote.clone());
        Ok(quote)
    }

    /// Fetches a dispute with its quote and both parties.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection.
    pub async fn dispute_detail(&self, dispute_id: &str) -> Result<DisputeDetail, ApiError> {
        self.client
            .get_dispute(dispute_id)
            .await
            .inspect_err(|e| self.note_failure(e))
    }

    /// What the signed-in user may do with a loaded quote.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be read.
    pub async fn capabilities(&self, quote: &Quote) -> Result<QuoteCapabilities, ApiError> {
        let actor = self.session.current().await?.actor().ok();
        Ok(compute_quote_capabilities(actor.as_ref(), quote))
    }

    /// What the signed-in user may do with each dispute on a quote.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be read.
    pub async fn dispute_capabilities(
        &self,
        quote: &Quote,
    ) -> Result<Vec<(String, DisputeCapabilities)>, ApiError> {
        let actor = self.session.current().await?.actor().ok();
        Ok(quote
            .disputes
            .iter()
            .map(|d| (d.id.clone(), compute_dispute_capabilities(actor.as_ref(), d)))
            .collect())
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// Marks a booked quote as completed.
    ///
    /// # Errors
    ///
    /// Returns the local refusal or the server's rejection.
    pub async fn complete(&self, quote_id: &str) -> Result<TransitionResult, ApiError> {
        let action = QuoteAction::MarkCompleted {
            quote_id: quote_id.to_string(),
        };
        let prepared = self.prepare(&action).await?;
        let result = self.client.complete_quote(&prepared.csrf, quote_id).await;
        self.commit(&action, result).await
    }

    /// Cancels a quote.
    ///
    /// # Errors
    ///
    /// Returns the local refusal or the server's rejection.
    pub async fn cancel(&self, quote_id: &str) -> Result<TransitionResult, ApiError> {
        let action = QuoteAction::Cancel {
            quote_id: quote_id.to_string(),
        };
        let prepared = self.prepare(&action).await?;
        let result = self.client.cancel_quote(&prepared.csrf, quote_id).await;
        self.commit(&action, result).await
    }

    /// Raises a dispute against a quote.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Domain` for a blank reason, otherwise the local
    /// refusal or the server's rejection.
    pub async fn raise_dispute(
        &self,
        quote_id: &str,
        reason: &str,
        details: Option<String>,
    ) -> Result<TransitionResult, ApiError> {
        let reason = validate_dispute_reason(reason)?.to_string();
        let details = details.filter(|d| !d.trim().is_empty());
        let action = QuoteAction::RaiseDispute {
            quote_id: quote_id.to_string(),
            reason: reason.clone(),
            details: details.clone(),
        };
        let prepared = self.prepare(&action).await?;
        let result = self
            .client
            .raise_dispute(
                &prepared.csrf,
                quote_id,
                &RaiseDisputeRequest { reason, details },
            )
            .await;
        self.commit(&action, result).await
    }

    /// Closes a dispute the user raised.
    ///
    /// # Errors
    ///
    /// Returns the local refusal or the server's rejection.
    pub async fn close_dispute(&self, dispute_id: &str) -> Result<TransitionResult, ApiError> {
        let action = QuoteAction::CloseDispute {
            dispute_id: dispute_id.to_string(),
        };
        let prepared = self.prepare(&action).await?;
        let result = self.client.close_dispute(&prepared.csrf, dispute_id).await;
        self.commit(&action, result).await
    }

    /// Deletes an open or closed dispute the user raised.
    ///
    /// # Errors
    ///
    /// Returns the local refusal or the server's rejection.
    pub async fn delete_dispute(&self, dispute_id: &str) -> Result<TransitionResult, ApiError> {
        let action = QuoteAction::DeleteDispute {
            dispute_id: dispute_id.to_string(),
        };
        let prepared = self.prepare(&action).await?;
        let result = self.client.delete_dispute(&prepared.csrf, dispute_id).await;
        self.commit(&action, result).await
    }

    /// Creates the review of a completed quote, or replaces an existing one.
    ///
    /// # Errors
    ///
    /// Returns the local refusal or the server's rejection.
    pub async fn submit_review(
        &self,
        quote_id: &str,
        rating: Rating,
        comment: Option<String>,
    ) -> Result<TransitionResult, ApiError> {
        let comment = comment.filter(|c| !c.trim().is_empty());
        let action = QuoteAction::SubmitReview {
            quote_id: quote_id.to_string(),
            rating,
            comment: comment.clone(),
        };
        let prepared = self.prepare(&action).await?;
        let replace = self
            .board
            .lock()
            .await
            .get(quote_id)
            .is_some_and(|q| q.review.is_some());
        let result = self
            .client
            .submit_review(
                &prepared.csrf,
                quote_id,
                &ReviewRequest { rating, comment },
                replace,
            )
            .await;
        self.commit(&action, result).await
    }

    /// Deletes the review of a quote.
    ///
    /// # Errors
    ///
    /// Returns the local refusal or the server's rejection.
    pub async fn delete_review(&self, quote_id: &str) -> Result<TransitionResult, ApiError> {
        let action = QuoteAction::DeleteReview {
            quote_id: quote_id.to_string(),
        };
        let prepared = self.prepare(&action).await?;
        let result = self.client.delete_review(&prepared.csrf, quote_id).await;
        self.commit(&action, result).await
    }

    // ------------------------------------------------------------------
    // Shared steps
    // ------------------------------------------------------------------

    /// Claims the action's in-flight slot and checks CSRF and the gate.
    pub(crate) async fn prepare(&self, action: &QuoteAction) -> Result<Prepared, ApiError> {
        let key = InFlightKey::from(action);
        let guard = self
            .in_flight
            .try_acquire(key.clone())
            .ok_or_else(|| ApiError::AlreadyInFlight {
                action: key.kind.to_string(),
                entity_id: key.entity_id.clone(),
            })?;

        let session = self.session.current().await?;
        let Some(csrf) = session.csrf_token.clone() else {
            warn!(action = %key.kind, "refusing action without a CSRF token");
            return Err(ApiError::MissingCsrfToken);
        };

        self.check_gate(&session, action).await?;

        Ok(Prepared {
            csrf,
            _guard: guard,
        })
    }

    async fn check_gate(&self, session: &Session, action: &QuoteAction) -> Result<(), ApiError> {
        let actor: AuthenticatedActor = session.actor()?;
        let quote = self.target_quote(action).await?;
        check_action(&actor, &quote, action).map_err(|denial| {
            info!(action = %action.kind(), quote_id = %quote.id, %denial, "action refused");
            ApiError::ActionDenied(denial)
        })
    }

    /// The quote an action targets, fetched if it is not on the board.
    async fn target_quote(&self, action: &QuoteAction) -> Result<Quote, ApiError> {
        {
            let board = self.board.lock().await;
            let found = if action.kind().targets_dispute() {
                board.quote_for_dispute(action.entity_id())
            } else {
                board.get(action.entity_id())
            };
            if let Some(quote) = found {
                return Ok(quote.clone());
            }
        }

        if action.kind().targets_dispute() {
            let detail = self.dispute_detail(action.entity_id()).await?;
            let quote_id = detail
                .quote
                .map(|q| q.id)
                .or(detail.dispute.quote_id)
                .ok_or_else(|| ApiError::Decode(String::from("dispute has no quote")))?;
            self.load_quote(&quote_id).await
        } else {
            self.load_quote(action.entity_id()).await
        }
    }

    /// Applies a confirmed quote, or reports the failure without touching the board.
    pub(crate) async fn commit(
        &self,
        action: &QuoteAction,
        result: Result<Quote, ApiError>,
    ) -> Result<TransitionResult, ApiError> {
        let quote = result.inspect_err(|e| {
            warn!(action = %action.kind(), entity_id = action.entity_id(), error = %e, "action failed");
            self.note_failure(e);
        })?;

        let transition = apply(&mut *self.board.lock().await, action, quote)?;
        info!(
            action = %action.kind(),
            quote_id = %transition.quote_id,
            status = %transition.new_status,
            "action confirmed"
        );
        Ok(transition)
    }

    /// Drops the cached session when the server says it has ended.
    pub(crate) fn note_failure(&self, error: &ApiError) {
        if error.requires_login()
            && let Err(e) = self.session.clear()
        {
            warn!(error = %e, "failed to clear expired session");
        }
    }
}
