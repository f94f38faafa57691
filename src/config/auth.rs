//! Authentication configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Authentication configuration (HS256 bearer tokens)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared secret used to verify bearer tokens
    pub token_secret: Secret<String>,
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.token_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH_TOKEN_SECRET"));
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: Secret::new(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_secret() {
        let config = AuthConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn accepts_non_empty_secret() {
        let config = AuthConfig {
            token_secret: Secret::new("a-long-enough-secret".to_string()),
        };
        assert!(config.validate().is_ok());
    }
}
