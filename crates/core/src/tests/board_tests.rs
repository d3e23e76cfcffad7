// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use quotedesk_domain::{DisplayStatus, DisputeStatus, ProjectionMode, QuoteStatus};

use crate::QuoteBoard;

use super::helpers::{create_test_dispute, create_test_quote, today};

#[test]
fn test_views_recompute_display_status_per_read() {
    let board = QuoteBoard::from_quotes(vec![
        create_test_quote("q-1", QuoteStatus::Pending, "2026-05-19"),
        create_test_quote("q-2", QuoteStatus::Accepted, "2026-05-19"),
    ]);

    let dashboard = board.views(ProjectionMode::Dashboard, today());
    assert_eq!(dashboard[0].display_status, DisplayStatus::DateReachedPending);
    assert_eq!(dashboard[1].display_status, DisplayStatus::OverduePaymentPending);

    let detail = board.views(ProjectionMode::Detail, today());
    assert_eq!(detail[0].display_status, DisplayStatus::Overdue);
    assert_eq!(detail[1].display_status, DisplayStatus::PaymentPending);

    // Same records, an earlier day: nothing stored goes stale.
    let earlier = chrono::NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
    let dashboard = board.views(ProjectionMode::Dashboard, earlier);
    assert_eq!(dashboard[0].display_status, DisplayStatus::Pending);
    assert_eq!(dashboard[1].display_status, DisplayStatus::Accepted);
}

#[test]
fn test_views_keep_server_order() {
    let board = QuoteBoard::from_quotes(vec![
        create_test_quote("q-3", QuoteStatus::Booked, "2026-06-01"),
        create_test_quote("q-1", QuoteStatus::Booked, "2026-06-01"),
        create_test_quote("q-2", QuoteStatus::Booked, "2026-06-01"),
    ]);

    let ids: Vec<&str> = board
        .views(ProjectionMode::Dashboard, today())
        .iter()
        .map(|v| v.quote.id.as_str())
        .collect();
    assert_eq!(ids, vec!["q-3", "q-1", "q-2"]);
}

#[test]
fn test_quote_for_dispute() {
    let mut disputed = create_test_quote("q-2", QuoteStatus::Booked, "2026-06-01");
    disputed
        .disputes
        .push(create_test_dispute("d-9", DisputeStatus::Open));
    let board = QuoteBoard::from_quotes(vec![
        create_test_quote("q-1", QuoteStatus::Booked, "2026-06-01"),
        disputed,
    ]);

    assert_eq!(board.quote_for_dispute("d-9").unwrap().id, "q-2");
    assert!(board.quote_for_dispute("d-404").is_none());
}

#[test]
fn test_reload_replaces_all_records() {
    let mut board = QuoteBoard::from_quotes(vec![create_test_quote(
        "q-1",
        QuoteStatus::Pending,
        "2026-06-01",
    )]);

    board.reload(vec![
        create_test_quote("q-5", QuoteStatus::Completed, "2026-04-01"),
        create_test_quote("q-6", QuoteStatus::Cancelled, "2026-04-02"),
    ]);

    assert_eq!(board.len(), 2);
    assert!(board.get("q-1").is_none());
    assert!(board.get("q-5").is_some());
}

#[test]
fn test_summary_counts_dashboard_labels() {
    let board = QuoteBoard::from_quotes(vec![
        create_test_quote("q-1", QuoteStatus::Booked, "2026-05-01"),
        create_test_quote("q-2", QuoteStatus::Booked, "2026-06-01"),
        create_test_quote("q-3", QuoteStatus::Completed, "2026-05-01"),
    ]);

    let summary = board.summary(today());
    assert_eq!(summary.total, 3);
    assert_eq!(summary.count(DisplayStatus::OverdueBooked), 1);
    assert_eq!(summary.count(DisplayStatus::Booked), 1);
    assert_eq!(summary.count(DisplayStatus::Completed), 1);
}
