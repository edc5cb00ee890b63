//! Authentication types for the domain layer.
//!
//! These types represent an authenticated caller extracted from a verified
//! access token. They have **no provider dependencies** - any token scheme
//! can populate them via the `SessionValidator` port.
//!
//! # Design Decisions
//!
//! - `AuthenticatedUser` carries only the claims the ledger consumes
//! - `Role` is a closed set; every permission decision goes through it
//!   instead of scattered string comparisons
//! - `AuthError` is domain-centric, not provider-specific

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::UserId;

/// Caller role within the studio.
///
/// Roles are assigned by the identity provider and only verified here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A paying client who books sessions against a subscription.
    Client,
    /// The trainer running the studio.
    Trainer,
    /// Administrative staff.
    Admin,
}

impl Role {
    /// Returns true for roles with administrative privileges over the
    /// schedule (cancel any booking, block slots, run reconciliation).
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Trainer | Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Client => "client",
            Role::Trainer => "trainer",
            Role::Admin => "admin",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(Role::Client),
            "trainer" => Ok(Role::Trainer),
            "admin" => Ok(Role::Admin),
            _ => Err(AuthError::InvalidToken),
        }
    }
}

/// Authenticated caller extracted from a verified token.
///
/// This is a **domain type** with no provider dependencies.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the identity provider.
    pub id: UserId,

    /// The caller's role, as asserted by the identity provider.
    pub role: Role,

    /// User's email address from the token claims.
    pub email: String,

    /// Display name if available.
    pub full_name: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    ///
    /// This is typically called by a `SessionValidator` adapter after
    /// successfully verifying a token.
    pub fn new(id: UserId, role: Role, email: impl Into<String>, full_name: Option<String>) -> Self {
        Self {
            id,
            role,
            email: email.into(),
            full_name,
        }
    }

    /// Returns the user's display name, or email as fallback.
    pub fn display_name_or_email(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.email)
    }
}

/// Authentication errors that can occur during token validation.
///
/// These errors are **domain-centric** - they describe what went wrong
/// from the ledger's perspective, not the identity provider's.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// The authentication service is unavailable (network, config, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the caller should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user_id() -> UserId {
        UserId::new("user-123").unwrap()
    }

    #[test]
    fn authenticated_user_new_creates_user() {
        let user = AuthenticatedUser::new(
            test_user_id(),
            Role::Client,
            "test@example.com",
            Some("Test User".to_string()),
        );

        assert_eq!(user.id.as_str(), "user-123");
        assert_eq!(user.role, Role::Client);
        assert_eq!(user.email, "test@example.com");
        assert_eq!(user.full_name, Some("Test User".to_string()));
    }

    #[test]
    fn authenticated_user_display_name_or_email_returns_name_when_present() {
        let user = AuthenticatedUser::new(
            test_user_id(),
            Role::Client,
            "test@example.com",
            Some("Alice".to_string()),
        );

        assert_eq!(user.display_name_or_email(), "Alice");
    }

    #[test]
    fn authenticated_user_display_name_or_email_returns_email_when_no_name() {
        let user = AuthenticatedUser::new(test_user_id(), Role::Client, "bob@example.com", None);

        assert_eq!(user.display_name_or_email(), "bob@example.com");
    }

    #[test]
    fn staff_roles_are_trainer_and_admin() {
        assert!(Role::Trainer.is_staff());
        assert!(Role::Admin.is_staff());
        assert!(!Role::Client.is_staff());
    }

    #[test]
    fn role_parses_from_known_strings() {
        assert_eq!("client".parse::<Role>().unwrap(), Role::Client);
        assert_eq!("trainer".parse::<Role>().unwrap(), Role::Trainer);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
    }

    #[test]
    fn role_rejects_unknown_strings() {
        assert!("owner".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
        assert!("CLIENT".parse::<Role>().is_err());
    }

    #[test]
    fn role_serializes_to_snake_case() {
        assert_eq!(serde_json::to_string(&Role::Client).unwrap(), "\"client\"");
        assert_eq!(serde_json::to_string(&Role::Trainer).unwrap(), "\"trainer\"");
    }

    #[test]
    fn auth_error_invalid_token_displays_correctly() {
        let err = AuthError::InvalidToken;
        assert_eq!(format!("{}", err), "Invalid or expired token");
    }

    #[test]
    fn auth_error_service_unavailable_displays_message() {
        let err = AuthError::service_unavailable("Connection refused");
        assert_eq!(
            format!("{}", err),
            "Auth service unavailable: Connection refused"
        );
    }

    #[test]
    fn auth_error_requires_reauthentication_for_token_errors() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(!AuthError::service_unavailable("").requires_reauthentication());
    }

    #[test]
    fn auth_error_is_transient_for_service_errors() {
        assert!(AuthError::service_unavailable("timeout").is_transient());
        assert!(!AuthError::InvalidToken.is_transient());
    }
}
