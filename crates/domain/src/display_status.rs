// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Display-status projection.
//!
//! A display status is a presentation-only refinement of a quote's server
//! status, computed from the status, the service date and today's date. It
//! is never stored: every read recomputes it from the canonical record.
//!
//! Two views label quotes differently and both contracts are kept:
//!
//! - The dashboard distinguishes *why* an open quote is late
//!   (`Date Reached (Pending)`, `Overdue (Payment Pending)`,
//!   `Overdue (Booked)`) and leaves accepted or booked quotes alone on the
//!   day of service.
//! - The detail view always shows an accepted quote as `Payment Pending`,
//!   whatever the date, and otherwise uses the coarser `Date Reached` and
//!   `Overdue` labels.
//!
//! A service date that cannot be parsed leaves the status unchanged.

use crate::quote_status::QuoteStatus;
use crate::types::Quote;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Which view's labeling contract to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    /// Quote lists on the artist and customer dashboards.
    Dashboard,
    /// The single-quote detail page.
    Detail,
}

impl ProjectionMode {
    /// Every display status this mode can produce.
    #[must_use]
    pub const fn vocabulary(&self) -> &'static [DisplayStatus] {
        match self {
            Self::Dashboard => &[
                DisplayStatus::Pending,
                DisplayStatus::Accepted,
                DisplayStatus::Booked,
                DisplayStatus::Completed,
                DisplayStatus::Cancelled,
                DisplayStatus::DateReachedPending,
                DisplayStatus::OverduePaymentPending,
                DisplayStatus::OverdueBooked,
            ],
            Self::Detail => &[
                DisplayStatus::Pending,
                DisplayStatus::Booked,
                DisplayStatus::Completed,
                DisplayStatus::Cancelled,
                DisplayStatus::DateReached,
                DisplayStatus::Overdue,
                DisplayStatus::PaymentPending,
            ],
        }
    }
}

/// Presentation label for a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DisplayStatus {
    Pending,
    Accepted,
    Booked,
    Completed,
    Cancelled,
    #[serde(rename = "Date Reached (Pending)")]
    DateReachedPending,
    #[serde(rename = "Overdue (Payment Pending)")]
    OverduePaymentPending,
    #[serde(rename = "Overdue (Booked)")]
    OverdueBooked,
    #[serde(rename = "Date Reached")]
    DateReached,
    Overdue,
    #[serde(rename = "Payment Pending")]
    PaymentPending,
}

impl DisplayStatus {
    /// The label shown to users.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Booked => "Booked",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::DateReachedPending => "Date Reached (Pending)",
            Self::OverduePaymentPending => "Overdue (Payment Pending)",
            Self::OverdueBooked => "Overdue (Booked)",
            Self::DateReached => "Date Reached",
            Self::Overdue => "Overdue",
            Self::PaymentPending => "Payment Pending",
        }
    }

    #[must_use]
    pub const fn is_overdue(&self) -> bool {
        matches!(
            self,
            Self::OverduePaymentPending | Self::OverdueBooked | Self::Overdue
        )
    }

    #[must_use]
    pub const fn is_date_reached(&self) -> bool {
        matches!(self, Self::DateReachedPending | Self::DateReached)
    }
}

impl From<QuoteStatus> for DisplayStatus {
    fn from(status: QuoteStatus) -> Self {
        match status {
            QuoteStatus::Pending => Self::Pending,
            QuoteStatus::Accepted => Self::Accepted,
            QuoteStatus::Booked => Self::Booked,
            QuoteStatus::Completed => Self::Completed,
            QuoteStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl std::fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Projects a status with the given mode's contract.
#[must_use]
pub fn project(
    mode: ProjectionMode,
    status: QuoteStatus,
    service_date: Option<NaiveDate>,
    today: NaiveDate,
) -> DisplayStatus {
    match mode {
        ProjectionMode::Dashboard => project_dashboard(status, service_date, today),
        ProjectionMode::Detail => project_detail(status, service_date, today),
    }
}

/// Dashboard labeling.
#[must_use]
pub fn project_dashboard(
    status: QuoteStatus,
    service_date: Option<NaiveDate>,
    today: NaiveDate,
) -> DisplayStatus {
    if !status.is_open() {
        return status.into();
    }
    let Some(date) = service_date else {
        return status.into();
    };

    match (date.cmp(&today), status) {
        (Ordering::Equal | Ordering::Less, QuoteStatus::Pending) => {
            DisplayStatus::DateReachedPending
        }
        (Ordering::Less, QuoteStatus::Accepted) => DisplayStatus::OverduePaymentPending,
        (Ordering::Less, QuoteStatus::Booked) => DisplayStatus::OverdueBooked,
        _ => status.into(),
    }
}

/// Detail-view labeling.
#[must_use]
pub fn project_detail(
    status: QuoteStatus,
    service_date: Option<NaiveDate>,
    today: NaiveDate,
) -> DisplayStatus {
    match status {
        QuoteStatus::Accepted => DisplayStatus::PaymentPending,
        QuoteStatus::Completed | QuoteStatus::Cancelled => status.into(),
        QuoteStatus::Pending | QuoteStatus::Booked => match service_date.map(|d| d.cmp(&today)) {
            Some(Ordering::Equal) => DisplayStatus::DateReached,
            Some(Ordering::Less) => DisplayStatus::Overdue,
            Some(Ordering::Greater) | None => status.into(),
        },
    }
}

impl Quote {
    /// The display status of this quote under `mode` as of `today`.
    #[must_use]
    pub fn display_status(&self, mode: ProjectionMode, today: NaiveDate) -> DisplayStatus {
        project(mode, self.status, self.service_day(), today)
    }
}

/// Per-label quote counts for a dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total: usize,
    pub counts: BTreeMap<DisplayStatus, usize>,
}

impl DashboardSummary {
    /// Counts `quotes` by their dashboard display status.
    #[must_use]
    pub fn from_quotes<'a>(quotes: impl IntoIterator<Item = &'a Quote>, today: NaiveDate) -> Self {
        let mut summary = Self::default();
        for quote in quotes {
            let status = quote.display_status(ProjectionMode::Dashboard, today);
            *summary.counts.entry(status).or_insert(0) += 1;
            summary.total += 1;
        }
        summary
    }

    #[must_use]
    pub fn count(&self, status: DisplayStatus) -> usize {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    /// Number of quotes whose service date has passed without completion.
    #[must_use]
    pub fn overdue(&self) -> usize {
        self.counts
            .iter()
            .filter(|(status, _)| status.is_overdue())
            .map(|(_, n)| n)
            .sum()
    }
}
