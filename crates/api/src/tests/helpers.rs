// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use quotedesk_domain::{Dispute, DisputeStatus, Quote, QuoteStatus, Role, User};
use quotedesk_persistence::MemoryStorage;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::{AuthenticatedActor, ClientConfig, Marketplace};

pub const ARTIST_ID: &str = "artist-1";
pub const CUSTOMER_ID: &str = "customer-1";
pub const OTHER_CUSTOMER_ID: &str = "customer-2";
pub const CSRF_TOKEN: &str = "csrf-token-1";

pub fn create_test_artist() -> AuthenticatedActor {
    AuthenticatedActor::new(ARTIST_ID, Role::Artist)
}

pub fn create_test_customer() -> AuthenticatedActor {
    AuthenticatedActor::new(CUSTOMER_ID, Role::Customer)
}

pub fn create_test_user(id: &str, role: Option<Role>) -> User {
    User {
        id: id.to_string(),
        name: Some(String::from("Test User")),
        email: Some(format!("{id}@example.com")),
        role,
        image_url: None,
    }
}

pub fn create_test_quote(id: &str, status: QuoteStatus) -> Quote {
    Quote {
        id: id.to_string(),
        artist_id: String::from(ARTIST_ID),
        customer_id: (status != QuoteStatus::Pending).then(|| String::from(CUSTOMER_ID)),
        product_type: String::from("Bridal makeup"),
        details: String::from("Trial plus wedding day"),
        price: Some(String::from("450.00")),
        service_date: String::from("2026-06-01"),
        service_time: Some(String::from("09:00-11:00")),
        status,
        review: None,
        disputes: Vec::new(),
        artist: None,
        customer: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn create_test_dispute(id: &str, status: DisputeStatus, initiator_id: &str) -> Dispute {
    Dispute {
        id: id.to_string(),
        quote_id: None,
        reason: String::from("Artist did not arrive"),
        details: None,
        status,
        resolution: None,
        initiator_id: initiator_id.to_string(),
        initiator_role: Role::Customer,
        involved_id: Some(String::from(ARTIST_ID)),
        created_at: None,
        updated_at: None,
    }
}

/// A quote with one dispute attached.
pub fn with_dispute(mut quote: Quote, dispute: Dispute) -> Quote {
    quote.disputes.push(dispute);
    quote
}

pub fn quote_body(quote: &Quote) -> serde_json::Value {
    json!({ "quote": quote })
}

pub fn marketplace(server: &MockServer) -> Marketplace {
    let config = ClientConfig::new(&server.uri()).unwrap();
    Marketplace::new(config, Arc::new(MemoryStorage::new())).unwrap()
}

/// Mounts `/auth/me` for `user`, and `/auth/csrf-token` answering with
/// `csrf`, or failing when `csrf` is `None`.
pub async fn mount_session(server: &MockServer, user: &User, csrf: Option<&str>) {
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": user })))
        .mount(server)
        .await;

    let csrf_response = match csrf {
        Some(token) => ResponseTemplate::new(200).set_body_json(json!({ "csrfToken": token })),
        None => ResponseTemplate::new(500).set_body_json(json!({ "message": "unavailable" })),
    };
    Mock::given(method("GET"))
        .and(path("/auth/csrf-token"))
        .respond_with(csrf_response)
        .mount(server)
        .await;
}

/// Mounts `GET /api/quotes/:id` answering with `quote`.
pub async fn mount_quote(server: &MockServer, quote: &Quote) {
    Mock::given(method("GET"))
        .and(path(format!("/api/quotes/{}", quote.id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(quote_body(quote)))
        .mount(server)
        .await;
}
