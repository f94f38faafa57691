//! Static token verifier for tests and local development.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::TokenVerifier;

/// `TokenVerifier` backed by a fixed token -> user table.
#[derive(Default)]
pub struct MockTokenVerifier {
    users: HashMap<String, AuthenticatedUser>,
}

impl MockTokenVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user for a token. Panics on an empty user id, which
    /// is acceptable for a test double.
    pub fn with_user(mut self, token: impl Into<String>, id: &str, external_id: &str) -> Self {
        self.users.insert(
            token.into(),
            AuthenticatedUser::new(
                UserId::new(id).unwrap(),
                external_id,
                Some(id.to_string()),
            ),
        );
        self
    }
}

#[async_trait]
impl TokenVerifier for MockTokenVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        self.users
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_token_verifies() {
        let verifier = MockTokenVerifier::new().with_user("token-a", "user-a", "ext-a");
        let user = verifier.verify("token-a").await.unwrap();
        assert_eq!(user.id.as_str(), "user-a");
    }

    #[tokio::test]
    async fn unknown_token_is_rejected() {
        let verifier = MockTokenVerifier::new();
        assert!(matches!(
            verifier.verify("nope").await,
            Err(AuthError::InvalidToken)
        ));
    }
}
