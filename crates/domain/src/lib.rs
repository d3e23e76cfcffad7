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

mod display_status;
mod dispute_status;
mod error;
mod quote_status;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use display_status::{
    DashboardSummary, DisplayStatus, ProjectionMode, project, project_dashboard, project_detail,
};
pub use dispute_status::DisputeStatus;
pub use error::DomainError;
pub use quote_status::QuoteStatus;
pub use types::{
    Dispute, DisputeDetail, PartySummary, Quote, QuoteSummary, Rating, Review, Role, User,
};
pub use validation::{
    ServiceTime, parse_service_date, parse_service_time, validate_dispute_reason, validate_price,
};
