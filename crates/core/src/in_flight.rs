// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-operation in-flight guards.
//!
//! Requests are not cancellable once sent, so a second click on the same
//! button must be refused locally. A guard is keyed by the action kind and
//! the id of the quote or dispute it targets, and is released when dropped.

use crate::command::{ActionKind, QuoteAction};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

/// Identifies one in-flight operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InFlightKey {
    pub kind: ActionKind,
    pub entity_id: String,
}

impl InFlightKey {
    #[must_use]
    pub fn new(kind: ActionKind, entity_id: impl Into<String>) -> Self {
        Self {
            kind,
            entity_id: entity_id.into(),
        }
    }
}

impl From<&QuoteAction> for InFlightKey {
    fn from(action: &QuoteAction) -> Self {
        Self::new(action.kind(), action.entity_id())
    }
}

impl std::fmt::Display for InFlightKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.entity_id)
    }
}

/// The set of operations currently in flight. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct InFlightGuards {
    active: Arc<Mutex<HashSet<InFlightKey>>>,
}

/// Holds an in-flight slot until dropped.
#[derive(Debug)]
pub struct InFlightGuard {
    key: InFlightKey,
    active: Arc<Mutex<HashSet<InFlightKey>>>,
}

impl InFlightGuards {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `key`, or returns `None` if it is already in flight.
    #[must_use]
    pub fn try_acquire(&self, key: InFlightKey) -> Option<InFlightGuard> {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if active.insert(key.clone()) {
            Some(InFlightGuard {
                key,
                active: Arc::clone(&self.active),
            })
        } else {
            None
        }
    }

    /// Whether `key` is in flight, for disabling the matching control.
    #[must_use]
    pub fn is_in_flight(&self, key: &InFlightKey) -> bool {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl InFlightGuard {
    #[must_use]
    pub const fn key(&self) -> &InFlightKey {
        &self.key
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}
