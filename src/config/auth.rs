//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Authentication configuration (JWT verification)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared secret for HS256 token verification
    pub jwt_secret: String,

    /// Expected token issuer
    pub issuer: String,

    /// Expected audience for tokens
    pub audience: String,

    /// Clock skew tolerance for expiry checks, in seconds
    #[serde(default = "default_leeway")]
    pub leeway_secs: u64,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// In production, requires a secret of at least 32 bytes.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.jwt_secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH_JWT_SECRET"));
        }
        if self.issuer.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH_ISSUER"));
        }
        if self.audience.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH_AUDIENCE"));
        }

        if *environment == Environment::Production && self.jwt_secret.len() < 32 {
            return Err(ValidationError::WeakJwtSecret);
        }

        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            issuer: String::new(),
            audience: String::new(),
            leeway_secs: default_leeway(),
        }
    }
}

fn default_leeway() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "a-sufficiently-long-shared-secret-value".to_string(),
            issuer: "https://auth.example.com".to_string(),
            audience: "ringside-api".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.leeway_secs, 30);
    }

    #[test]
    fn test_validation_missing_secret() {
        let config = AuthConfig::default();
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_validation_missing_issuer() {
        let config = AuthConfig {
            issuer: String::new(),
            ..valid_config()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_validation_production_requires_strong_secret() {
        let config = AuthConfig {
            jwt_secret: "short".to_string(),
            ..valid_config()
        };
        // Allowed in development
        assert!(config.validate(&Environment::Development).is_ok());
        // Rejected in production
        assert!(config.validate(&Environment::Production).is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid_config().validate(&Environment::Production).is_ok());
    }
}
