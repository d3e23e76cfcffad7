// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Plain-text rendering for terminal output.

use quotedesk::{QuoteView, TransitionResult};
use quotedesk_api::{DisputeCapabilities, QuoteCapabilities};
use quotedesk_domain::{
    DashboardSummary, DisplayStatus, DisputeDetail, Quote, ServiceTime, User, parse_service_time,
};

fn service_time(raw: Option<&str>) -> String {
    match raw.map(parse_service_time) {
        None => String::from("-"),
        Some(Ok(ServiceTime::At(at))) => at.format("%H:%M").to_string(),
        Some(Ok(ServiceTime::Range { start, end })) => {
            format!("{}-{}", start.format("%H:%M"), end.format("%H:%M"))
        }
        Some(Ok(ServiceTime::FreeText(text))) => text,
        // Shown as typed; a bad time does not hide the quote.
        Some(Err(_)) => raw.unwrap_or("-").to_string(),
    }
}

pub fn render_user(user: &User) -> String {
    let mut lines = vec![format!("{} ({})", user.display_name(), user.id)];
    if let Some(email) = &user.email {
        lines.push(format!("Email: {email}"));
    }
    lines.push(format!(
        "Role:  {}",
        user.role.map_or("none chosen yet", |r| r.as_str())
    ));
    lines.join("\n")
}

pub fn render_board(views: &[QuoteView<'_>], summary: &DashboardSummary) -> String {
    if views.is_empty() {
        return String::from("No quotes yet.");
    }

    let mut lines = vec![format!(
        "{:<12} {:<28} {:<11} {:<11} {:>10}  {}",
        "ID", "PRODUCT", "DATE", "TIME", "PRICE", "STATUS"
    )];
    for view in views {
        let quote = view.quote;
        lines.push(format!(
            "{:<12} {:<28} {:<11} {:<11} {:>10}  {}",
            quote.id,
            truncate(&quote.product_type, 28),
            quote.service_date,
            service_time(quote.service_time.as_deref()),
            quote.price.as_deref().unwrap_or("-"),
            view.display_status.label()
        ));
    }

    lines.push(String::new());
    let counts: Vec<String> = summary
        .counts
        .iter()
        .map(|(status, n)| format!("{}: {n}", status.label()))
        .collect();
    lines.push(format!(
        "{} quotes, {} overdue ({})",
        summary.total,
        summary.overdue(),
        counts.join(", ")
    ));
    lines.join("\n")
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

fn allowed(label: &'static str, allowed: bool) -> Option<&'static str> {
    allowed.then_some(label)
}

pub fn render_quote(
    quote: &Quote,
    status: DisplayStatus,
    caps: &QuoteCapabilities,
    dispute_caps: &[(String, DisputeCapabilities)],
) -> String {
    let mut lines = vec![
        format!("Quote {}: {}", quote.id, quote.product_type),
        format!("Status:   {}", status.label()),
        format!(
            "When:     {} {}",
            quote.service_date,
            service_time(quote.service_time.as_deref())
        ),
        format!("Price:    {}", quote.price.as_deref().unwrap_or("-")),
        format!(
            "Artist:   {}",
            quote
                .artist
                .as_ref()
                .and_then(|a| a.name.clone())
                .unwrap_or_else(|| quote.artist_id.clone())
        ),
    ];
    if let Some(customer_id) = &quote.customer_id {
        let name = quote
            .customer
            .as_ref()
            .and_then(|c| c.name.clone())
            .unwrap_or_else(|| customer_id.clone());
        lines.push(format!("Customer: {name}"));
    }
    if !quote.details.is_empty() {
        lines.push(String::new());
        lines.push(quote.details.clone());
    }

    if let Some(review) = &quote.review {
        lines.push(String::new());
        lines.push(format!(
            "Review: {}/5 {}",
            review.rating.value(),
            review.comment.as_deref().unwrap_or("")
        ));
    }

    if !quote.disputes.is_empty() {
        lines.push(String::new());
        lines.push(String::from("Disputes:"));
        for dispute in &quote.disputes {
            let mut line = format!("  {} [{}] {}", dispute.id, dispute.status, dispute.reason);
            if let Some((_, caps)) = dispute_caps.iter().find(|(id, _)| *id == dispute.id) {
                let actions: Vec<&str> = [
                    allowed("close", caps.can_close.is_allowed()),
                    allowed("delete", caps.can_delete.is_allowed()),
                ]
                .into_iter()
                .flatten()
                .collect();
                if !actions.is_empty() {
                    line.push_str(&format!("  (you can: {})", actions.join(", ")));
                }
            }
            lines.push(line);
        }
    }

    let actions: Vec<&str> = [
        allowed("accept", caps.can_accept.is_allowed()),
        allowed("complete", caps.can_complete.is_allowed()),
        allowed("cancel", caps.can_cancel.is_allowed()),
        allowed("dispute raise", caps.can_raise_dispute.is_allowed()),
        allowed("review submit", caps.can_submit_review.is_allowed()),
        allowed("review delete", caps.can_delete_review.is_allowed()),
    ]
    .into_iter()
    .flatten()
    .collect();
    lines.push(String::new());
    if actions.is_empty() {
        lines.push(String::from("No actions available."));
    } else {
        lines.push(format!("Actions: {}", actions.join(", ")));
    }
    lines.join("\n")
}

pub fn render_dispute(detail: &DisputeDetail) -> String {
    let dispute = &detail.dispute;
    let mut lines = vec![
        format!("Dispute {} [{}]", dispute.id, dispute.status),
        format!("Reason: {}", dispute.reason),
    ];
    if let Some(details) = &dispute.details {
        lines.push(format!("Details: {details}"));
    }
    let initiator = detail
        .initiator
        .as_ref()
        .and_then(|p| p.name.clone())
        .unwrap_or_else(|| dispute.initiator_id.clone());
    lines.push(format!("Raised by: {initiator} ({})", dispute.initiator_role));
    if let Some(quote) = &detail.quote {
        lines.push(format!(
            "Quote: {} {} [{}]",
            quote.id,
            quote.product_type.as_deref().unwrap_or(""),
            quote.status
        ));
    }
    if let Some(resolution) = &dispute.resolution {
        lines.push(format!("Resolution: {resolution}"));
    }
    lines.join("\n")
}

pub fn render_transition(result: &TransitionResult) -> String {
    match result.previous_status {
        Some(previous) if result.status_changed() => format!(
            "Quote {}: {previous} -> {}",
            result.quote_id, result.new_status
        ),
        _ => format!("Quote {} is {}", result.quote_id, result.new_status),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use quotedesk::QuoteBoard;
    use quotedesk_api::Capability;
    use quotedesk_domain::{ProjectionMode, QuoteStatus, Role};

    fn quote(id: &str, status: QuoteStatus, date: &str) -> Quote {
        Quote {
            id: id.to_string(),
            artist_id: String::from("artist-1"),
            customer_id: Some(String::from("customer-1")),
            product_type: String::from("Portrait session"),
            details: String::new(),
            price: Some(String::from("120.00")),
            service_date: date.to_string(),
            service_time: Some(String::from("14:00")),
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
    fn test_board_shows_display_status_and_summary() {
        let today = chrono::NaiveDate::from_ymd_opt(2026, 5, 20).unwrap();
        let board = QuoteBoard::from_quotes(vec![
            quote("q-1", QuoteStatus::Booked, "2026-05-19"),
            quote("q-2", QuoteStatus::Completed, "2026-05-01"),
        ]);
        let text = render_board(&board.views(ProjectionMode::Dashboard, today), &board.summary(today));

        assert!(text.contains("Overdue (Booked)"));
        assert!(text.contains("Completed"));
        assert!(text.contains("2 quotes, 1 overdue"));
    }

    #[test]
    fn test_empty_board() {
        assert_eq!(
            render_board(&[], &DashboardSummary::default()),
            "No quotes yet."
        );
    }

    #[test]
    fn test_quote_lists_allowed_actions() {
        let q = quote("q-1", QuoteStatus::Booked, "2026-06-01");
        let mut caps = QuoteCapabilities::none();
        caps.can_complete = Capability::Allowed;
        let text = render_quote(&q, DisplayStatus::Booked, &caps, &[]);
        assert!(text.contains("Actions: complete"));
        assert!(text.contains("14:00"));

        let none = render_quote(&q, DisplayStatus::Booked, &QuoteCapabilities::none(), &[]);
        assert!(none.contains("No actions available."));
    }

    #[test]
    fn test_user_without_role() {
        let user = User {
            id: String::from("u-1"),
            name: None,
            email: Some(String::from("a@example.com")),
            role: None,
            image_url: None,
        };
        let text = render_user(&user);
        assert!(text.starts_with("a@example.com (u-1)"));
        assert!(text.contains("none chosen yet"));

        let artist = User {
            role: Some(Role::Artist),
            ..user
        };
        assert!(render_user(&artist).contains("Role:  artist"));
    }

    #[test]
    fn test_transition_text() {
        let changed = TransitionResult {
            quote_id: String::from("q-1"),
            previous_status: Some(QuoteStatus::Booked),
            new_status: QuoteStatus::Completed,
        };
        assert_eq!(render_transition(&changed), "Quote q-1: Booked -> Completed");
    }

    #[test]
    fn test_free_text_time_is_kept() {
        assert_eq!(service_time(Some("after sunset")), "after sunset");
        assert_eq!(service_time(Some("09:00-11:30")), "09:00-11:30");
        assert_eq!(service_time(None), "-");
    }
}
