// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage backends.
//!
//! - `memory`: process-local storage, the equivalent of one browser tab's
//!   session storage
//! - `file`: a JSON object on disk, so a command-line session survives
//!   between invocations

pub mod file;
pub mod memory;

use crate::error::PersistenceError;

/// String key-value storage backing the session cache.
///
/// Implementations must be safe to share between tasks.
pub trait SessionStorage: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Removes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}
