// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod error;
mod in_flight;
mod state;

#[cfg(test)]
mod tests;

pub use apply::{apply, apply_refreshed, target_quote_id};
pub use command::{ActionKind, QuoteAction};
pub use error::CoreError;
pub use in_flight::{InFlightGuard, InFlightGuards, InFlightKey};
pub use state::{QuoteBoard, QuoteView, TransitionResult};
