// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use std::collections::BTreeMap;
use url::Url;

/// Default API origin for a local development server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// How long a cached session stays valid.
pub const DEFAULT_SESSION_TTL: time::Duration = time::Duration::minutes(30);

/// Settings for talking to one marketplace server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin the API paths are resolved against.
    pub base_url: Url,
    pub timeout: std::time::Duration,
    pub session_ttl: time::Duration,
    /// A `Cookie` header value sent with every request, for reusing a
    /// browser session from the command line.
    pub session_cookie: Option<String>,
}

impl ClientConfig {
    /// Creates a config for `base_url` with default timings.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the URL does not parse or is not http(s).
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Config(format!("invalid API URL '{base_url}': {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "API URL must use http or https, got '{}'",
                base_url.scheme()
            )));
        }
        Ok(Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            session_ttl: DEFAULT_SESSION_TTL,
            session_cookie: None,
        })
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_session_ttl(mut self, ttl: time::Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_session_cookie(mut self, cookie: Option<String>) -> Self {
        self.session_cookie = cookie.filter(|c| !c.trim().is_empty());
        self
    }

    /// Builds the URL of an API path given as segments, e.g.
    /// `["api", "quotes", quote_id, "accept"]`.
    ///
    /// Each segment is percent-encoded on its own, so an id cannot add
    /// segments, a query or a fragment. A path prefix on the base URL is
    /// kept: `https://host/backend/` resolves to `https://host/backend/api/...`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for an empty, `.` or `..` segment and
    /// `ApiError::Config` if the base URL cannot carry a path.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        if let Some(bad) = segments
            .iter()
            .find(|s| matches!(s.trim(), "" | "." | ".."))
        {
            return Err(ApiError::Validation {
                message: format!("'{bad}' is not a valid id"),
                fields: BTreeMap::new(),
            });
        }

        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|()| ApiError::Config(format!("API URL '{}' cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new(DEFAULT_BASE_URL).unwrap();
        assert_eq!(config.timeout, std::time::Duration::from_secs(30));
        assert_eq!(config.session_ttl, time::Duration::minutes(30));
        assert_eq!(config.session_cookie, None);
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(matches!(
            ClientConfig::new("not a url"),
            Err(ApiError::Config(_))
        ));
        assert!(matches!(
            ClientConfig::new("ftp://example.com"),
            Err(ApiError::Config(_))
        ));
    }

    #[test]
    fn test_endpoint_resolution() {
        let config = ClientConfig::new("https://market.example.com").unwrap();
        assert_eq!(
            config
                .endpoint(&["api", "quotes", "q-1", "accept"])
                .unwrap()
                .as_str(),
            "https://market.example.com/api/quotes/q-1/accept"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        for base in [
            "https://api.example.com/backend/",
            "https://api.example.com/backend",
            "https://api.example.com/backend/?debug=1#top",
        ] {
            let config = ClientConfig::new(base).unwrap();
            assert_eq!(
                config.endpoint(&["api", "quotes", "q-1"]).unwrap().as_str(),
                "https://api.example.com/backend/api/quotes/q-1",
                "base {base}"
            );
        }
    }

    #[test]
    fn test_ids_stay_inside_their_segment() {
        let config = ClientConfig::new("https://api.example.com").unwrap();
        let url = |id: &str| {
            config
                .endpoint(&["api", "quotes", id, "complete"])
                .unwrap()
                .to_string()
        };

        assert_eq!(
            url("../../auth/logout#"),
            "https://api.example.com/api/quotes/..%2F..%2Fauth%2Flogout%23/complete"
        );
        assert_eq!(
            url("q?x=1"),
            "https://api.example.com/api/quotes/q%3Fx=1/complete"
        );
        assert_eq!(url("a/b"), "https://api.example.com/api/quotes/a%2Fb/complete");

        let parsed = config
            .endpoint(&["api", "quotes", "q?x=1#frag", "complete"])
            .unwrap();
        assert_eq!(parsed.query(), None);
        assert_eq!(parsed.fragment(), None);
    }

    #[test]
    fn test_dot_and_empty_ids_are_rejected() {
        let config = ClientConfig::new("https://api.example.com").unwrap();
        for id in ["..", ".", "", "  "] {
            assert!(
                matches!(
                    config.endpoint(&["api", "quotes", id]),
                    Err(ApiError::Validation { .. })
                ),
                "id {id:?}"
            );
        }
    }

    #[test]
    fn test_blank_cookie_is_ignored() {
        let config = ClientConfig::new(DEFAULT_BASE_URL)
            .unwrap()
            .with_session_cookie(Some(String::from("  ")));
        assert_eq!(config.session_cookie, None);
    }
}
