//! JWT adapter for the `TokenVerifier` port.
//!
//! Validates HS256 tokens minted by the auth collaborator with a
//! shared secret. Expected claims:
//!
//! - `sub` - internal user id
//! - `ext` - the user's identity on the communications provider
//! - `name` - optional display name
//! - `exp` - expiry (validated)

use async_trait::async_trait;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::TokenVerifier;

/// Claims carried by an access token.
#[derive(Debug, Deserialize)]
struct AccessClaims {
    sub: String,
    ext: String,
    #[serde(default)]
    name: Option<String>,
    #[allow(dead_code)]
    exp: i64,
}

/// HS256 `TokenVerifier` with a shared secret.
pub struct JwtTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenVerifier {
    /// Creates a verifier for the given shared secret.
    pub fn new(secret: Secret<String>) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

#[async_trait]
impl TokenVerifier for JwtTokenVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })?;

        let claims = data.claims;
        let id = UserId::new(claims.sub).map_err(|_| AuthError::InvalidToken)?;
        Ok(AuthenticatedUser::new(id, claims.ext, claims.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestClaims<'a> {
        sub: &'a str,
        ext: &'a str,
        name: Option<&'a str>,
        exp: i64,
    }

    fn sign(secret: &str, claims: &TestClaims<'_>) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn verifier(secret: &str) -> JwtTokenVerifier {
        JwtTokenVerifier::new(Secret::new(secret.to_string()))
    }

    fn future_exp() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }

    #[tokio::test]
    async fn valid_token_yields_authenticated_user() {
        let token = sign(
            "shared-secret",
            &TestClaims {
                sub: "user-1",
                ext: "ext-1",
                name: Some("Alice"),
                exp: future_exp(),
            },
        );

        let user = verifier("shared-secret").verify(&token).await.unwrap();
        assert_eq!(user.id.as_str(), "user-1");
        assert_eq!(user.external_id, "ext-1");
        assert_eq!(user.display_name.as_deref(), Some("Alice"));
    }

    #[tokio::test]
    async fn wrong_secret_is_invalid() {
        let token = sign(
            "other-secret",
            &TestClaims {
                sub: "user-1",
                ext: "ext-1",
                name: None,
                exp: future_exp(),
            },
        );

        let result = verifier("shared-secret").verify(&token).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn expired_token_is_reported_as_expired() {
        let token = sign(
            "shared-secret",
            &TestClaims {
                sub: "user-1",
                ext: "ext-1",
                name: None,
                exp: chrono::Utc::now().timestamp() - 3600,
            },
        );

        let result = verifier("shared-secret").verify(&token).await;
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[tokio::test]
    async fn garbage_token_is_invalid() {
        let result = verifier("shared-secret").verify("not.a.jwt").await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }
}
