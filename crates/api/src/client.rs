// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP client for the marketplace REST API.
//!
//! Authentication rides on the session cookie. Every mutating request
//! carries the `CSRF-Token` header; callers obtain the token from the
//! session cache and pass it in explicitly.

use crate::capabilities::GateDenial;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::request_response::{
    AcceptResponse, CapturePaymentRequest, CsrfResponse, ErrorBody, MeResponse,
    QuoteListResponse, QuoteResponse, RaiseDisputeRequest, ReviewRequest, RoleRequest,
};
use quotedesk_domain::{DisputeDetail, Quote, Role, User};
use reqwest::header::{ACCEPT, COOKIE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Name of the anti-forgery header.
pub const CSRF_HEADER: &str = "CSRF-Token";

/// REST client bound to one server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Creates a client with a cookie store and the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the session cookie is not a valid
    /// header value or the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(cookie) = &config.session_cookie {
            let mut value = HeaderValue::from_str(cookie)
                .map_err(|e| ApiError::Config(format!("invalid session cookie: {e}")))?;
            value.set_sensitive(true);
            headers.insert(COOKIE, value);
        }

        let http = reqwest::Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Builds a request for the API path made of `segments`.
    fn request(
        &self,
        method: Method,
        segments: &[&str],
        csrf: Option<&str>,
    ) -> Result<(RequestBuilder, String), ApiError> {
        let url = self.config.endpoint(segments)?;
        let path = url.path().to_string();
        let mut builder = self.http.request(method, url);
        if let Some(token) = csrf {
            builder = builder.header(CSRF_HEADER, token);
        }
        Ok((builder, path))
    }

    /// Sends a request and returns the body of a 2xx response.
    async fn execute(&self, builder: RequestBuilder, path: &str) -> Result<String, ApiError> {
        let response = builder.send().await.map_err(|e| {
            warn!(path, error = %e, "request failed before a response arrived");
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            debug!(path, status = status.as_u16(), "request succeeded");
            return Ok(body);
        }

        let parsed: ErrorBody = serde_json::from_str(&body).unwrap_or_default();
        let message = parsed.best_message().unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
        warn!(path, status = status.as_u16(), %message, "server rejected request");
        Err(ApiError::from_status(
            status.as_u16(),
            message,
            parsed.field_errors(),
        ))
    }

    fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let (builder, path) = self.request(Method::GET, segments, None)?;
        let body = self.execute(builder, &path).await?;
        Self::decode(&body)
    }

    async fn send<B: Serialize + Sync>(
        &self,
        method: Method,
        segments: &[&str],
        csrf: &str,
        body: Option<&B>,
    ) -> Result<String, ApiError> {
        let (mut builder, path) = self.request(method, segments, Some(csrf))?;
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.execute(builder, &path).await
    }

    /// Sends a mutating request whose response carries the updated quote.
    async fn send_for_quote<B: Serialize + Sync>(
        &self,
        method: Method,
        segments: &[&str],
        csrf: &str,
        body: Option<&B>,
    ) -> Result<Quote, ApiError> {
        let body = self.send(method, segments, csrf, body).await?;
        Self::decode::<QuoteResponse>(&body).map(QuoteResponse::into_quote)
    }

    // ------------------------------------------------------------------
    // Identity
    // ------------------------------------------------------------------

    /// `GET /auth/me`
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` when no session cookie is active.
    pub async fn fetch_me(&self) -> Result<User, ApiError> {
        self.get_json::<MeResponse>(&["auth", "me"])
            .await
            .map(|r| r.user)
    }

    /// `GET /auth/csrf-token`
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be fetched.
    pub async fn fetch_csrf_token(&self) -> Result<String, ApiError> {
        self.get_json::<CsrfResponse>(&["auth", "csrf-token"])
            .await
            .map(|r| r.csrf_token)
    }

    /// `POST /auth/logout`. The token is optional because logout is
    /// attempted even when none could be obtained.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection, if any.
    pub async fn logout(&self, csrf: Option<&str>) -> Result<(), ApiError> {
        let (builder, path) = self.request(Method::POST, &["auth", "logout"], csrf)?;
        self.execute(builder, &path).await.map(|_| ())
    }

    /// `PUT /auth/role`
    ///
    /// # Errors
    ///
    /// Returns the server's rejection, if any.
    pub async fn set_role(&self, csrf: &str, role: Role) -> Result<(), ApiError> {
        self.send(Method::PUT, &["auth", "role"], csrf, Some(&RoleRequest { role }))
            .await
            .map(|_| ())
    }

    // ------------------------------------------------------------------
    // Quotes
    // ------------------------------------------------------------------

    /// Lists the quotes where the user is the artist or the customer.
    ///
    /// # Errors
    ///
    /// Admins have no quote list and get `ApiError::ActionDenied`.
    pub async fn list_quotes(&self, role: Role) -> Result<Vec<Quote>, ApiError> {
        let dashboard = match role {
            Role::Artist => "artist",
            Role::Customer => "customer",
            Role::Admin => {
                return Err(ApiError::ActionDenied(GateDenial::NotEligible {
                    action: "list quotes",
                    role,
                }));
            }
        };
        self.get_json::<QuoteListResponse>(&["api", "quotes", dashboard])
            .await
            .map(QuoteListResponse::into_quotes)
    }

    /// `GET /api/quotes/:id`
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for unknown quotes.
    pub async fn get_quote(&self, quote_id: &str) -> Result<Quote, ApiError> {
        self.get_json::<QuoteResponse>(&["api", "quotes", quote_id])
            .await
            .map(QuoteResponse::into_quote)
    }

    /// `POST /api/quotes/:id/accept`
    ///
    /// # Errors
    ///
    /// Returns the server's rejection, if any.
    pub async fn accept_quote(&self, csrf: &str, quote_id: &str) -> Result<AcceptResponse, ApiError> {
        let body = self
            .send::<()>(Method::POST, &["api", "quotes", quote_id, "accept"], csrf, None)
            .await?;
        Self::decode(&body)
    }

    /// `POST /api/quotes/:id/capture-payment`
    ///
    /// # Errors
    ///
    /// Returns the server's rejection, if any.
    pub async fn capture_payment(
        &self,
        csrf: &str,
        quote_id: &str,
        payment: &CapturePaymentRequest,
    ) -> Result<Quote, ApiError> {
        self.send_for_quote(
            Method::POST,
            &["api", "quotes", quote_id, "capture-payment"],
            csrf,
            Some(payment),
        )
        .await
    }

    /// `POST /api/quotes/:id/cancel-payment`, reverting an accepted quote to pending.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection, if any.
    pub async fn cancel_payment(&self, csrf: &str, quote_id: &str) -> Result<Quote, ApiError> {
        self.send_for_quote::<()>(
            Method::POST,
            &["api", "quotes", quote_id, "cancel-payment"],
            csrf,
            None,
        )
        .await
    }

    /// `POST /api/quotes/:id/complete`
    ///
    /// # Errors
    ///
    /// Returns the server's rejection, if any.
    pub async fn complete_quote(&self, csrf: &str, quote_id: &str) -> Result<Quote, ApiError> {
        self.send_for_quote::<()>(
            Method::POST,
            &["api", "quotes", quote_id, "complete"],
            csrf,
            None,
        )
        .await
    }

    /// `POST /api/quotes/:id/cancel`
    ///
    /// # Errors
    ///
    /// Returns the server's rejection, if any.
    pub async fn cancel_quote(&self, csrf: &str, quote_id: &str) -> Result<Quote, ApiError> {
        self.send_for_quote::<()>(
            Method::POST,
            &["api", "quotes", quote_id, "cancel"],
            csrf,
            None,
        )
        .await
    }

    /// `POST /api/quotes/:id/review` to create, `PUT` to replace.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection, if any.
    pub async fn submit_review(
        &self,
        csrf: &str,
        quote_id: &str,
        review: &ReviewRequest,
        replace: bool,
    ) -> Result<Quote, ApiError> {
        let method = if replace { Method::PUT } else { Method::POST };
        self.send_for_quote(
            method,
            &["api", "quotes", quote_id, "review"],
            csrf,
            Some(review),
        )
        .await
    }

    /// `DELETE /api/quotes/:id/review`
    ///
    /// # Errors
    ///
    /// Returns the server's rejection, if any.
    pub async fn delete_review(&self, csrf: &str, quote_id: &str) -> Result<Quote, ApiError> {
        self.send_for_quote::<()>(
            Method::DELETE,
            &["api", "quotes", quote_id, "review"],
            csrf,
            None,
        )
        .await
    }

    // ------------------------------------------------------------------
    // Disputes
    // ------------------------------------------------------------------

    /// `POST /api/quotes/:id/dispute`
    ///
    /// # Errors
    ///
    /// Returns the server's rejection, if any.
    pub async fn raise_dispute(
        &self,
        csrf: &str,
        quote_id: &str,
        dispute: &RaiseDisputeRequest,
    ) -> Result<Quote, ApiError> {
        self.send_for_quote(
            Method::POST,
            &["api", "quotes", quote_id, "dispute"],
            csrf,
            Some(dispute),
        )
        .await
    }

    /// `POST /api/quotes/disputes/:id/close`
    ///
    /// # Errors
    ///
    /// Returns the server's rejection, if any.
    pub async fn close_dispute(&self, csrf: &str, dispute_id: &str) -> Result<Quote, ApiError> {
        self.send_for_quote::<()>(
            Method::POST,
            &["api", "quotes", "disputes", dispute_id, "close"],
            csrf,
            None,
        )
        .await
    }

    /// `DELETE /api/quotes/disputes/:id`
    ///
    /// # Errors
    ///
    /// Returns the server's rejection, if any.
    pub async fn delete_dispute(&self, csrf: &str, dispute_id: &str) -> Result<Quote, ApiError> {
        self.send_for_quote::<()>(
            Method::DELETE,
            &["api", "quotes", "disputes", dispute_id],
            csrf,
            None,
        )
        .await
    }

    /// `GET /api/quotes/disputes/:id`
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for unknown disputes.
    pub async fn get_dispute(&self, dispute_id: &str) -> Result<DisputeDetail, ApiError> {
        self.get_json(&["api", "quotes", "disputes", dispute_id])
            .await
    }
}
