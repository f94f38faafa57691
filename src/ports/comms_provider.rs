//! Communications provider port.
//!
//! Contract for the hosted video/chat service. A session owns one
//! video call and one chat channel on the provider, both addressed by
//! the session's call id; they are created together at session
//! creation and hard-deleted together when the host ends the session.
//!
//! The provider is treated as an opaque capability set - its wire
//! protocol lives entirely in the adapter.

use crate::domain::foundation::CallId;
use async_trait::async_trait;
use thiserror::Error;

/// Port for the hosted video call / chat channel service.
#[async_trait]
pub trait CommsProvider: Send + Sync {
    /// Get-or-create the video call for a session.
    ///
    /// `creator_external_id` is the host's identity on the provider;
    /// `metadata` is attached as custom call data.
    async fn create_call(
        &self,
        call_id: &CallId,
        creator_external_id: &str,
        metadata: CallMetadata,
    ) -> Result<(), CommsError>;

    /// Create the chat channel for a session with its initial members.
    async fn create_channel(
        &self,
        call_id: &CallId,
        name: &str,
        creator_external_id: &str,
        members: &[String],
    ) -> Result<(), CommsError>;

    /// Add a member to an existing chat channel.
    async fn add_channel_member(
        &self,
        call_id: &CallId,
        external_id: &str,
    ) -> Result<(), CommsError>;

    /// Hard-delete the video call.
    async fn delete_call(&self, call_id: &CallId) -> Result<(), CommsError>;

    /// Delete the chat channel.
    async fn delete_channel(&self, call_id: &CallId) -> Result<(), CommsError>;
}

/// Custom data attached to a provider call at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallMetadata {
    /// The session's id, as a string.
    pub session_id: String,

    /// Coding problem.
    pub problem: String,

    /// Difficulty label.
    pub difficulty: String,
}

/// Errors from the communications provider.
#[derive(Debug, Clone, Error)]
pub enum CommsError {
    /// The provider rejected the request.
    #[error("Provider returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never completed (network, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// Provider credentials are missing or invalid.
    #[error("Provider authentication failed: {0}")]
    Auth(String),
}

impl CommsError {
    /// Creates a transport error with a message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn comms_provider_is_object_safe() {
        fn _accepts_dyn(_provider: &dyn CommsProvider) {}
    }

    #[test]
    fn comms_error_api_displays_status() {
        let err = CommsError::Api {
            status: 429,
            message: "rate limited".to_string(),
        };
        assert_eq!(format!("{}", err), "Provider returned 429: rate limited");
    }
}
