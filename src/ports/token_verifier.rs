//! Token verifier port for authentication.
//!
//! The user/auth model is an external collaborator; the HTTP layer
//! only needs "Bearer token in, authenticated user out". Keeping this
//! behind a port means the middleware does not change whether tokens
//! come from a real identity provider or a test double.

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use async_trait::async_trait;

/// Port for validating Bearer tokens.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Validate a token and return the authenticated user.
    ///
    /// # Errors
    ///
    /// - `InvalidToken` / `TokenExpired` on bad credentials
    /// - `ServiceUnavailable` when validation infrastructure fails
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
