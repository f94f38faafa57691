//! Authentication types for the domain layer.
//!
//! These types represent an authenticated user extracted from a Bearer
//! token. They carry **no provider dependencies** - any auth backend
//! can populate them via the `TokenVerifier` port.
//!
//! The communications provider addresses members by its own identity
//! scheme, so alongside the internal `UserId` we carry the user's
//! `external_id` as registered with that provider.

use super::UserId;
use thiserror::Error;

/// Authenticated user extracted from a validated token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The internal user identifier.
    pub id: UserId,

    /// The user's identity on the communications provider.
    pub external_id: String,

    /// Display name if available.
    pub display_name: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    ///
    /// Typically called by a `TokenVerifier` adapter after validating
    /// a token.
    pub fn new(id: UserId, external_id: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            id,
            external_id: external_id.into(),
            display_name,
        }
    }
}

/// Authentication errors that can occur during token validation.
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
}
