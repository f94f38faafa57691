//! Session reader port (read side / CQRS queries).
//!
//! Read-optimized views for listing and display. Identity expansion
//! (host/participant name, email, image, provider id) happens here,
//! not on the aggregate.

use crate::domain::foundation::{CallId, DomainError, SessionId, Timestamp, UserId};
use crate::domain::session::SessionStatus;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Reader port for session queries.
#[async_trait]
pub trait SessionReader: Send + Sync {
    /// Get a detailed session view with host and participant expanded.
    ///
    /// Returns `None` if not found.
    async fn get_by_id(&self, id: &SessionId) -> Result<Option<SessionView>, DomainError>;

    /// List active sessions newest-first, host expanded, capped at `limit`.
    async fn list_active(&self, limit: u32) -> Result<Vec<SessionView>, DomainError>;

    /// List completed sessions where the user is host or participant,
    /// newest-first, capped at `limit`. Identities are not expanded.
    async fn list_completed_for_user(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<SessionSummary>, DomainError>;
}

/// Display data for a user, joined from the auth collaborator's table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Internal user id.
    pub id: UserId,

    /// Display name.
    pub name: Option<String>,

    /// Contact email.
    pub email: Option<String>,

    /// Avatar URL.
    pub image_url: Option<String>,

    /// Identity on the communications provider.
    pub external_id: Option<String>,
}

/// Detailed view of a session with identities expanded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    /// Session ID.
    pub id: SessionId,

    /// Coding problem.
    pub problem: String,

    /// Difficulty label.
    pub difficulty: String,

    /// Host with display data.
    pub host: UserProfile,

    /// Participant with display data, if joined.
    pub participant: Option<UserProfile>,

    /// Provider correlation key.
    pub call_id: CallId,

    /// Current status.
    pub status: SessionStatus,

    /// When the session was created.
    pub created_at: Timestamp,
}

/// Flat session record for history lists (no identity expansion).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Session ID.
    pub id: SessionId,

    /// Coding problem.
    pub problem: String,

    /// Difficulty label.
    pub difficulty: String,

    /// Host user id.
    pub host: UserId,

    /// Participant user id, if joined.
    pub participant: Option<UserId>,

    /// Provider correlation key.
    pub call_id: CallId,

    /// Current status.
    pub status: SessionStatus,

    /// When the session was created.
    pub created_at: Timestamp,
}
