// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session storage for the QuoteDesk client.
//!
//! The session cache stores a single serialized entry under a fixed key.
//! This crate supplies the places that entry can live; it knows nothing
//! about what the entry contains.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod backend;
mod error;


pub use backend::SessionStorage;
pub use backend::file::FileStorage;
pub use backend::memory::MemoryStorage;
pub use error::PersistenceError;
