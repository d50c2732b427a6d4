//! Authenticated Session
//!
//! The signed-in user and the bearer token for secured endpoints. Passed
//! explicitly to whatever needs it; nothing here reads global state.

use serde::{Deserialize, Serialize};

/// Billing name used when the user has none
pub const ANONYMOUS_NAME: &str = "anonymous";

/// Billing email used when the user has none
pub const UNKNOWN_EMAIL: &str = "unknown";

/// Signed-in user as reported by the auth provider
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub uid: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl SessionUser {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Name to put on the card's billing details
    pub fn billing_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(ANONYMOUS_NAME)
    }

    /// Email to put on billing details and orders
    pub fn billing_email(&self) -> &str {
        self.email
            .as_deref()
            .filter(|email| !email.is_empty())
            .unwrap_or(UNKNOWN_EMAIL)
    }
}

/// Access token for bearer-authenticated endpoints
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(..)")
    }
}

/// User plus credentials
#[derive(Clone, Debug)]
pub struct AuthSession {
    pub user: SessionUser,
    pub token: BearerToken,
}

impl AuthSession {
    pub const fn new(user: SessionUser, token: BearerToken) -> Self {
        Self { user, token }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_billing_fallbacks() {
        let user = SessionUser::new("u1");
        assert_eq!(user.billing_name(), "anonymous");
        assert_eq!(user.billing_email(), "unknown");

        let user = user.with_display_name("").with_email("a@b.c");
        assert_eq!(user.billing_name(), "anonymous");
        assert_eq!(user.billing_email(), "a@b.c");
    }

    #[test]
    fn test_token_is_redacted() {
        let token = BearerToken::new("secret-value");
        assert_eq!(format!("{token:?}"), "BearerToken(..)");
        assert_eq!(token.as_str(), "secret-value");
    }
}
