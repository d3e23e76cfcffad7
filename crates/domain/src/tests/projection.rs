// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{Days, NaiveDate};

use crate::{
    DashboardSummary, DisplayStatus, ProjectionMode, Quote, QuoteStatus, project,
    project_dashboard, project_detail,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
}

fn yesterday() -> NaiveDate {
    today().checked_sub_days(Days::new(1)).unwrap()
}

fn tomorrow() -> NaiveDate {
    today().checked_add_days(Days::new(1)).unwrap()
}

fn quote_with(status: QuoteStatus, service_date: &str) -> Quote {
    Quote {
        id: String::from("q-1"),
        artist_id: String::from("artist-1"),
        customer_id: (status != QuoteStatus::Pending).then(|| String::from("customer-1")),
        product_type: String::from("Portrait"),
        details: String::from("A3 charcoal portrait"),
        price: Some(String::from("120.00")),
        service_date: service_date.to_string(),
        service_time: Some(String::from("10:00-12:00")),
        status,
        review: None,
        disputes: Vec::new(),
        artist: None,
        customer: None,
        created_at: None,
        updated_at: None,
    }
}

#[test]
fn test_terminal_statuses_pass_through_both_modes() {
    for status in [QuoteStatus::Completed, QuoteStatus::Cancelled] {
        for date in [Some(yesterday()), Some(today()), Some(tomorrow()), None] {
            for mode in [ProjectionMode::Dashboard, ProjectionMode::Detail] {
                assert_eq!(
                    project(mode, status, date, today()),
                    DisplayStatus::from(status),
                    "{mode:?} {status} {date:?}"
                );
            }
        }
    }
}

#[test]
fn test_dashboard_pending_on_or_before_today_is_date_reached() {
    for date in [yesterday(), today()] {
        assert_eq!(
            project_dashboard(QuoteStatus::Pending, Some(date), today()),
            DisplayStatus::DateReachedPending
        );
    }
    assert_eq!(
        project_dashboard(QuoteStatus::Pending, Some(tomorrow()), today()),
        DisplayStatus::Pending
    );
}

#[test]
fn test_dashboard_accepted_and_booked_unchanged_on_service_day() {
    assert_eq!(
        project_dashboard(QuoteStatus::Accepted, Some(today()), today()),
        DisplayStatus::Accepted
    );
    assert_eq!(
        project_dashboard(QuoteStatus::Booked, Some(today()), today()),
        DisplayStatus::Booked
    );
}

#[test]
fn test_dashboard_overdue_labels() {
    assert_eq!(
        project_dashboard(QuoteStatus::Accepted, Some(yesterday()), today()),
        DisplayStatus::OverduePaymentPending
    );
    assert_eq!(
        project_dashboard(QuoteStatus::Booked, Some(yesterday()), today()),
        DisplayStatus::OverdueBooked
    );
}

#[test]
fn test_dashboard_future_dates_unchanged() {
    for status in [
        QuoteStatus::Pending,
        QuoteStatus::Accepted,
        QuoteStatus::Booked,
    ] {
        assert_eq!(
            project_dashboard(status, Some(tomorrow()), today()),
            DisplayStatus::from(status)
        );
    }
}

#[test]
fn test_unparseable_date_fails_open() {
    let quote = quote_with(QuoteStatus::Booked, "next tuesday");
    assert_eq!(quote.service_day(), None);
    assert_eq!(
        quote.display_status(ProjectionMode::Dashboard, today()),
        DisplayStatus::Booked
    );
    assert_eq!(
        quote.display_status(ProjectionMode::Detail, today()),
        DisplayStatus::Booked
    );
}

#[test]
fn test_detail_accepted_is_always_payment_pending() {
    for date in [Some(yesterday()), Some(today()), Some(tomorrow()), None] {
        assert_eq!(
            project_detail(QuoteStatus::Accepted, date, today()),
            DisplayStatus::PaymentPending
        );
    }
}

#[test]
fn test_detail_date_reached_and_overdue() {
    for status in [QuoteStatus::Pending, QuoteStatus::Booked] {
        assert_eq!(
            project_detail(status, Some(today()), today()),
            DisplayStatus::DateReached
        );
        assert_eq!(
            project_detail(status, Some(yesterday()), today()),
            DisplayStatus::Overdue
        );
        assert_eq!(
            project_detail(status, Some(tomorrow()), today()),
            DisplayStatus::from(status)
        );
    }
}

/// The two views intentionally disagree for the same input.
#[test]
fn test_dashboard_and_detail_diverge_for_accepted_quotes() {
    let dashboard = project_dashboard(QuoteStatus::Accepted, Some(yesterday()), today());
    let detail = project_detail(QuoteStatus::Accepted, Some(yesterday()), today());
    assert_eq!(dashboard, DisplayStatus::OverduePaymentPending);
    assert_eq!(detail, DisplayStatus::PaymentPending);

    let dashboard = project_dashboard(QuoteStatus::Accepted, Some(tomorrow()), today());
    let detail = project_detail(QuoteStatus::Accepted, Some(tomorrow()), today());
    assert_eq!(dashboard, DisplayStatus::Accepted);
    assert_eq!(detail, DisplayStatus::PaymentPending);
}

#[test]
fn test_dashboard_and_detail_diverge_for_booked_on_service_day() {
    assert_eq!(
        project_dashboard(QuoteStatus::Booked, Some(today()), today()),
        DisplayStatus::Booked
    );
    assert_eq!(
        project_detail(QuoteStatus::Booked, Some(today()), today()),
        DisplayStatus::DateReached
    );
}

#[test]
fn test_projection_stays_within_mode_vocabulary() {
    let dates = [Some(yesterday()), Some(today()), Some(tomorrow()), None];
    for mode in [ProjectionMode::Dashboard, ProjectionMode::Detail] {
        for status in QuoteStatus::ALL {
            for date in dates {
                let projected = project(mode, status, date, today());
                assert!(
                    mode.vocabulary().contains(&projected),
                    "{mode:?} produced {projected} for {status} {date:?}"
                );
            }
        }
    }
}

#[test]
fn test_scenario_yesterday_quotes() {
    let pending = quote_with(QuoteStatus::Pending, "2026-03-14");
    let booked = quote_with(QuoteStatus::Booked, "2026-03-14");

    assert_eq!(
        pending.display_status(ProjectionMode::Dashboard, today()),
        DisplayStatus::DateReachedPending
    );
    assert_eq!(
        booked.display_status(ProjectionMode::Dashboard, today()),
        DisplayStatus::OverdueBooked
    );
}

#[test]
fn test_timestamp_service_dates_use_calendar_date() {
    let quote = quote_with(QuoteStatus::Booked, "2026-03-15T23:30:00.000Z");
    assert_eq!(quote.service_day(), Some(today()));
    assert_eq!(
        quote.display_status(ProjectionMode::Dashboard, today()),
        DisplayStatus::Booked
    );
}

#[test]
fn test_display_status_labels_serialize_verbatim() {
    for status in ProjectionMode::Dashboard
        .vocabulary()
        .iter()
        .chain(ProjectionMode::Detail.vocabulary())
    {
        let json = serde_json::to_string(status).unwrap();
        assert_eq!(json, format!("\"{}\"", status.label()));
    }
}

#[test]
fn test_dashboard_summary_counts() {
    let quotes = vec![
        quote_with(QuoteStatus::Pending, "2026-03-14"),
        quote_with(QuoteStatus::Pending, "2026-03-20"),
        quote_with(QuoteStatus::Accepted, "2026-03-01"),
        quote_with(QuoteStatus::Booked, "2026-03-10"),
        quote_with(QuoteStatus::Completed, "2026-03-01"),
    ];

    let summary = DashboardSummary::from_quotes(&quotes, today());

    assert_eq!(summary.total, 5);
    assert_eq!(summary.count(DisplayStatus::DateReachedPending), 1);
    assert_eq!(summary.count(DisplayStatus::Pending), 1);
    assert_eq!(summary.count(DisplayStatus::OverduePaymentPending), 1);
    assert_eq!(summary.count(DisplayStatus::OverdueBooked), 1);
    assert_eq!(summary.count(DisplayStatus::Completed), 1);
    assert_eq!(summary.count(DisplayStatus::Cancelled), 0);
    assert_eq!(summary.overdue(), 2);
}
