// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDate;
use quotedesk_domain::{DashboardSummary, DisplayStatus, ProjectionMode, Quote, QuoteStatus};
use serde::Serialize;

/// The client's canonical quote records, in the order the server listed them.
///
/// Records are only ever replaced wholesale by server representations.
/// Display statuses are not stored here; [`QuoteBoard::views`] computes
/// them on every read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteBoard {
    quotes: Vec<Quote>,
}

/// A quote paired with its display status for one read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteView<'a> {
    pub quote: &'a Quote,
    pub display_status: DisplayStatus,
}

/// The result of applying a server-confirmed quote to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    pub quote_id: String,
    /// Status before replacement; `None` if the quote was not loaded.
    pub previous_status: Option<QuoteStatus>,
    pub new_status: QuoteStatus,
}

impl TransitionResult {
    #[must_use]
    pub fn status_changed(&self) -> bool {
        self.previous_status != Some(self.new_status)
    }
}

impl QuoteBoard {
    #[must_use]
    pub const fn new() -> Self {
        Self { quotes: Vec::new() }
    }

    /// Builds a board from a freshly fetched list.
    #[must_use]
    pub const fn from_quotes(quotes: Vec<Quote>) -> Self {
        Self { quotes }
    }

    /// Replaces every record with a refetched list.
    pub fn reload(&mut self, quotes: Vec<Quote>) {
        self.quotes = quotes;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    #[must_use]
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    #[must_use]
    pub fn get(&self, quote_id: &str) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.id == quote_id)
    }

    /// The quote carrying `dispute_id`, if loaded.
    #[must_use]
    pub fn quote_for_dispute(&self, dispute_id: &str) -> Option<&Quote> {
        self.quotes
            .iter()
            .find(|q| q.disputes.iter().any(|d| d.id == dispute_id))
    }

    /// Every quote with its display status under `mode` as of `today`.
    #[must_use]
    pub fn views(&self, mode: ProjectionMode, today: NaiveDate) -> Vec<QuoteView<'_>> {
        self.quotes
            .iter()
            .map(|quote| QuoteView {
                quote,
                display_status: quote.display_status(mode, today),
            })
            .collect()
    }

    #[must_use]
    pub fn summary(&self, today: NaiveDate) -> DashboardSummary {
        DashboardSummary::from_quotes(&self.quotes, today)
    }

    /// Inserts or replaces a quote, returning the status it had before.
    pub(crate) fn upsert(&mut self, quote: Quote) -> Option<QuoteStatus> {
        match self.quotes.iter_mut().find(|q| q.id == quote.id) {
            Some(existing) => {
                let previous = existing.status;
                *existing = quote;
                Some(previous)
            }
            None => {
                self.quotes.push(quote);
                None
            }
        }
    }
}
