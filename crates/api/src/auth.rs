// Copyright (C) 2026 QuoteDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identity of the signed-in user as seen by the Action Gate.

use crate::capabilities::GateDenial;
use quotedesk_domain::{Role, User};
use url::Url;

/// An authenticated actor performing actions.
///
/// Only users who have chosen a role can act on quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The user's id.
    pub id: String,
    /// The user's role.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    /// Derives an actor from a cached user.
    ///
    /// # Errors
    ///
    /// Returns `GateDenial::NoRole` if the user has not chosen a role yet.
    pub fn from_user(user: &User) -> Result<Self, GateDenial> {
        user.role
            .map(|role| Self::new(user.id.clone(), role))
            .ok_or(GateDenial::NoRole)
    }

    #[must_use]
    pub fn is_artist(&self) -> bool {
        self.role == Role::Artist
    }

    #[must_use]
    pub fn is_customer(&self) -> bool {
        self.role == Role::Customer
    }
}

/// Checks that a user may assign themselves `role`.
///
/// Admin is granted by operators, never self-assigned.
///
/// # Errors
///
/// Returns `GateDenial::NotEligible` for the admin role.
pub fn authorize_role_assignment(role: Role) -> Result<(), GateDenial> {
    match role {
        Role::Artist | Role::Customer => Ok(()),
        Role::Admin => Err(GateDenial::NotEligible {
            action: "assign role",
            role: Role::Admin,
        }),
    }
}

/// Keeps a profile image only if it is an absolute http(s) URL with a host.
///
/// Inline `data:` images can be large enough to exhaust session storage.
#[must_use]
pub fn sanitize_image_url(image: Option<String>) -> Option<String> {
    image.filter(|raw| {
        Url::parse(raw)
            .is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
    })
}

/// Returns `user` with its image sanitized for caching.
#[must_use]
pub fn sanitize_user(mut user: User) -> User {
    user.image_url = sanitize_image_url(user.image_url.take());
    user
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Option<Role>, image: Option<&str>) -> User {
        User {
            id: String::from("u-1"),
            name: Some(String::from("Asha")),
            email: None,
            role,
            image_url: image.map(String::from),
        }
    }

    #[test]
    fn test_actor_requires_role() {
        assert_eq!(
            AuthenticatedActor::from_user(&user(None, None)),
            Err(GateDenial::NoRole)
        );
        let actor = AuthenticatedActor::from_user(&user(Some(Role::Artist), None));
        assert_eq!(actor, Ok(AuthenticatedActor::new("u-1", Role::Artist)));
    }

    #[test]
    fn test_admin_cannot_be_self_assigned() {
        assert!(authorize_role_assignment(Role::Artist).is_ok());
        assert!(authorize_role_assignment(Role::Customer).is_ok());
        assert!(authorize_role_assignment(Role::Admin).is_err());
    }

    #[test]
    fn test_inline_images_are_dropped() {
        let sanitized = sanitize_user(user(None, Some("data:image/png;base64,AAAA")));
        assert_eq!(sanitized.image_url, None);
    }

    #[test]
    fn test_http_images_are_kept() {
        let sanitized = sanitize_user(user(None, Some("https://cdn.example.com/a.png")));
        assert_eq!(
            sanitized.image_url.as_deref(),
            Some("https://cdn.example.com/a.png")
        );
        assert_eq!(
            sanitize_image_url(Some(String::from("HTTP://example.com/b.jpg"))),
            Some(String::from("HTTP://example.com/b.jpg"))
        );
        assert_eq!(sanitize_image_url(Some(String::from("/relative.png"))), None);
    }

    #[test]
    fn test_hostless_images_are_dropped() {
        for raw in ["http://", "https://", "https:", "javascript:alert(1)"] {
            assert_eq!(sanitize_image_url(Some(raw.to_string())), None, "{raw}");
        }
    }
}
