// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDate;
use quotedesk_domain::{Dispute, DisputeStatus, Quote, QuoteStatus, Role};

pub const ARTIST_ID: &str = "artist-1";
pub const CUSTOMER_ID: &str = "customer-1";

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, 20).unwrap()
}

pub fn create_test_quote(id: &str, status: QuoteStatus, service_date: &str) -> Quote {
    Quote {
        id: id.to_string(),
        artist_id: String::from(ARTIST_ID),
        customer_id: (status != QuoteStatus::Pending).then(|| String::from(CUSTOMER_ID)),
        product_type: String::from("Wedding photography"),
        details: String::from("Ceremony and reception"),
        price: Some(String::from("900.00")),
        service_date: service_date.to_string(),
        service_time: None,
        status,
        review: None,
        disputes: Vec::new(),
        artist: None,
        customer: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn create_test_dispute(id: &str, status: DisputeStatus) -> Dispute {
    Dispute {
        id: id.to_string(),
        quote_id: None,
        reason: String::from("Photos not delivered"),
        details: None,
        status,
        resolution: None,
        initiator_id: String::from(CUSTOMER_ID),
        initiator_role: Role::Customer,
        involved_id: Some(String::from(ARTIST_ID)),
        created_at: None,
        updated_at: None,
    }
}
