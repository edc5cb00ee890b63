//! Mock authentication adapter for testing.
//!
//! Implements the `SessionValidator` port for use in tests, avoiding the
//! need for a real identity provider.
//!
//! # Example
//!
//! ```ignore
//! use ringside::adapters::auth::MockSessionValidator;
//!
//! let validator = MockSessionValidator::new()
//!     .with_client("client-token", "client-1")
//!     .with_trainer("trainer-token", "trainer-1");
//!
//! let user = validator.validate("client-token").await.unwrap();
//! assert_eq!(user.id.as_str(), "client-1");
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, Role, UserId};
use crate::ports::SessionValidator;

/// Mock session validator for testing.
///
/// Stores a map of tokens to users. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    /// Map of valid tokens to their associated users
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Optional error to return for all validations (for error testing)
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    /// Creates a new empty mock validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.tokens.write().unwrap().insert(token.into(), user);
        self
    }

    /// Adds a valid token for a client with the given id.
    pub fn with_client(self, token: impl Into<String>, user_id: impl Into<String>) -> Self {
        self.with_role(token, user_id, Role::Client)
    }

    /// Adds a valid token for a trainer with the given id.
    pub fn with_trainer(self, token: impl Into<String>, user_id: impl Into<String>) -> Self {
        self.with_role(token, user_id, Role::Trainer)
    }

    /// Adds a valid token for an admin with the given id.
    pub fn with_admin(self, token: impl Into<String>, user_id: impl Into<String>) -> Self {
        self.with_role(token, user_id, Role::Admin)
    }

    /// Adds a valid token for a user with the given id and role.
    pub fn with_role(
        self,
        token: impl Into<String>,
        user_id: impl Into<String>,
        role: Role,
    ) -> Self {
        let user_id = user_id.into();
        let user = AuthenticatedUser::new(
            UserId::new(&user_id).unwrap(),
            role,
            format!("{}@test.example.com", user_id),
            Some(format!("Test User {}", user_id)),
        );
        self.with_user(token, user)
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// Registers a new valid token at runtime.
    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        self.tokens.write().unwrap().insert(token.into(), user);
    }

    /// Removes a token, making it invalid.
    pub fn remove_token(&self, token: &str) {
        self.tokens.write().unwrap().remove(token);
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        // Check for forced error
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        // Look up the token
        self.tokens
            .read()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
