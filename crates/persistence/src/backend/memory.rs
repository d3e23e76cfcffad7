// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashMap;
use std::sync::Mutex;

use super::SessionStorage;
use crate::error::PersistenceError;

/// In-memory session storage. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| PersistenceError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.entries
            .lock()
            .map_err(|_| PersistenceError::LockPoisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        self.entries
            .lock()
            .map_err(|_| PersistenceError::LockPoisoned)?
            .remove(key);
        Ok(())
    }
}
