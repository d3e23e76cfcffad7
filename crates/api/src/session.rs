// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session cache.
//!
//! Holds the signed-in user and the CSRF token for a bounded time so that
//! views do not refetch identity on every read. The cache is advisory only;
//! the server validates every privileged action.

use crate::auth::{AuthenticatedActor, sanitize_user};
use crate::capabilities::GateDenial;
use crate::client::ApiClient;
use crate::error::ApiError;
use quotedesk_domain::User;
use quotedesk_persistence::SessionStorage;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

/// Storage key of the cached session.
pub const SESSION_KEY: &str = "quotedesk.session";

/// What the cache remembers about the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: User,
    /// `None` when the token fetch failed; mutating actions are then refused.
    pub csrf_token: Option<String>,
}

impl Session {
    /// The actor the Action Gate evaluates.
    ///
    /// # Errors
    ///
    /// Returns `GateDenial::NoRole` if the user has not chosen a role.
    pub fn actor(&self) -> Result<AuthenticatedActor, GateDenial> {
        AuthenticatedActor::from_user(&self.user)
    }
}

/// A cached session with its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub value: Session,
    pub expires_at: OffsetDateTime,
    /// Set after a role change so the next read refetches.
    pub invalidated: bool,
}

impl CacheEntry {
    #[must_use]
    pub fn new(value: Session, now: OffsetDateTime, ttl: time::Duration) -> Self {
        Self {
            value,
            expires_at: now + ttl,
            invalidated: false,
        }
    }

    #[must_use]
    pub fn is_valid(&self, now: OffsetDateTime) -> bool {
        !self.invalidated && now < self.expires_at
    }
}

/// Returns true if `entry` exists and may be served at `now`.
#[must_use]
pub fn is_valid(entry: Option<&CacheEntry>, now: OffsetDateTime) -> bool {
    entry.is_some_and(|e| e.is_valid(now))
}

/// On-disk form of a [`CacheEntry`], with the expiry in Unix milliseconds.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEntry {
    value: Session,
    expires_at_ms: i64,
    #[serde(default)]
    invalidated: bool,
}

fn to_unix_ms(at: OffsetDateTime) -> i64 {
    i64::try_from(at.unix_timestamp_nanos() / 1_000_000).unwrap_or(i64::MAX)
}

fn from_unix_ms(ms: i64) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000).ok()
}

impl From<&CacheEntry> for StoredEntry {
    fn from(entry: &CacheEntry) -> Self {
        Self {
            value: entry.value.clone(),
            expires_at_ms: to_unix_ms(entry.expires_at),
            invalidated: entry.invalidated,
        }
    }
}

impl StoredEntry {
    fn into_entry(self) -> Option<CacheEntry> {
        Some(CacheEntry {
            value: self.value,
            expires_at: from_unix_ms(self.expires_at_ms)?,
            invalidated: self.invalidated,
        })
    }
}

/// The session cache over a storage backend.
#[derive(Clone)]
pub struct SessionCache {
    storage: Arc<dyn SessionStorage>,
    client: ApiClient,
    ttl: time::Duration,
}

impl std::fmt::Debug for SessionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCache")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl SessionCache {
    #[must_use]
    pub fn new(storage: Arc<dyn SessionStorage>, client: ApiClient) -> Self {
        let ttl = client.config().session_ttl;
        Self {
            storage,
            client,
            ttl,
        }
    }

    /// Reads the stored entry regardless of validity.
    ///
    /// Unreadable or corrupt entries count as a miss and are removed.
    #[must_use]
    pub fn read_entry(&self) -> Option<CacheEntry> {
        let raw = match self.storage.get(SESSION_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "session storage unreadable");
                return None;
            }
        };

        let entry = serde_json::from_str::<StoredEntry>(&raw)
            .ok()
            .and_then(StoredEntry::into_entry);
        if entry.is_none() {
            warn!("discarding corrupt session entry");
            if let Err(e) = self.storage.remove(SESSION_KEY) {
                warn!(error = %e, "failed to remove corrupt session entry");
            }
        }
        entry
    }

    /// Returns the cached session if it is still valid at `now`.
    #[must_use]
    pub fn load_at(&self, now: OffsetDateTime) -> Option<Session> {
        let entry = self.read_entry()?;
        if entry.is_valid(now) {
            Some(entry.value)
        } else {
            debug!(invalidated = entry.invalidated, "session cache miss");
            None
        }
    }

    #[must_use]
    pub fn load(&self) -> Option<Session> {
        self.load_at(OffsetDateTime::now_utc())
    }

    /// Stores `session` as valid from `now` for the configured TTL.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Storage` if the entry cannot be written.
    pub fn store_at(&self, session: Session, now: OffsetDateTime) -> Result<CacheEntry, ApiError> {
        let entry = CacheEntry::new(session, now, self.ttl);
        self.write_entry(&entry)?;
        Ok(entry)
    }

    fn write_entry(&self, entry: &CacheEntry) -> Result<(), ApiError> {
        let raw = serde_json::to_string(&StoredEntry::from(entry))
            .map_err(quotedesk_persistence::PersistenceError::from)?;
        self.storage.set(SESSION_KEY, &raw)?;
        Ok(())
    }

    /// Fetches the user and a CSRF token, and caches both.
    ///
    /// Without `force`, a valid cached session is returned without network
    /// access. Returns `Ok(None)` when the server reports no active session.
    ///
    /// # Errors
    ///
    /// Returns the identity fetch error (other than 401), or a storage error.
    pub async fn refresh(&self, force: bool) -> Result<Option<Session>, ApiError> {
        if !force && let Some(session) = self.load() {
            return Ok(Some(session));
        }

        let (user, csrf) = tokio::join!(self.client.fetch_me(), self.client.fetch_csrf_token());

        let user = match user {
            Ok(user) => user,
            Err(e) if e.requires_login() => {
                debug!("no active session on the server");
                self.clear()?;
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        let csrf_token = match csrf {
            Ok(token) => Some(token),
            Err(e) => {
                warn!(error = %e, "could not fetch CSRF token; mutating actions will be refused");
                None
            }
        };

        let session = Session {
            user: sanitize_user(user),
            csrf_token,
        };
        self.store_at(session.clone(), OffsetDateTime::now_utc())?;
        info!(
            user_id = %session.user.id,
            role = ?session.user.role,
            "session refreshed"
        );
        Ok(Some(session))
    }

    /// The cached session, refreshing on a miss.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` if nobody is signed in.
    pub async fn current(&self) -> Result<Session, ApiError> {
        self.refresh(false).await?.ok_or_else(|| ApiError::Unauthorized {
            message: String::from("not signed in"),
        })
    }

    /// Flags the cached session so the next read refetches the user.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Storage` if the entry cannot be rewritten.
    pub fn mark_role_changed(&self) -> Result<(), ApiError> {
        if let Some(mut entry) = self.read_entry() {
            entry.invalidated = true;
            self.write_entry(&entry)?;
        }
        Ok(())
    }

    /// Removes the cached session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Storage` if the entry cannot be removed.
    pub fn clear(&self) -> Result<(), ApiError> {
        self.storage.remove(SESSION_KEY)?;
        Ok(())
    }

    /// Signs out on the server and clears the local cache.
    ///
    /// The cache is cleared whatever the server answers; the server's
    /// error, if any, is still returned.
    ///
    /// # Errors
    ///
    /// Returns the logout request's error, or a storage error.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let cached = self.read_entry().and_then(|e| e.value.csrf_token);
        let csrf = match cached {
            Some(token) => Some(token),
            None => self.client.fetch_csrf_token().await.ok(),
        };

        let result = self.client.logout(csrf.as_deref()).await;
        self.clear()?;
        match &result {
            Ok(()) => info!("signed out"),
            Err(e) => warn!(error = %e, "server logout failed; local session cleared"),
        }
        result
    }
}
