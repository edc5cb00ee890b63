//! JWT implementation of the SessionValidator port.
//!
//! Verifies HS256-signed access tokens issued by the studio's identity
//! provider. Validation covers signature, expiry, issuer, and audience;
//! identity and role come from the verified claims, never from the raw
//! token.
//!
//! # Claims
//!
//! ```json
//! {
//!   "sub": "user-id",
//!   "role": "client",
//!   "email": "user@example.com",
//!   "name": "Display Name",
//!   "iss": "https://auth.example.com",
//!   "aud": "ringside-api",
//!   "exp": 1735689600
//! }
//! ```

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::config::AuthConfig;
use crate::domain::foundation::{AuthError, AuthenticatedUser, Role, UserId};
use crate::ports::SessionValidator;

/// Claims expected in an access token.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    role: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// HS256 token validator configured from [`AuthConfig`].
pub struct JwtSessionValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtSessionValidator {
    /// Creates a validator from the auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.leeway = config.leeway_secs;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })?;

        let claims = data.claims;
        let id = UserId::new(claims.sub).map_err(|_| AuthError::InvalidToken)?;
        let role: Role = claims.role.parse()?;
        let email = claims.email.unwrap_or_default();

        Ok(AuthenticatedUser::new(id, role, email, claims.name))
    }
}
