//! HTTP DTOs for session endpoints.
//!
//! These types decouple the wire format from domain types. Responses
//! wrap sessions in `{session}` / `{sessions}` envelopes.

use serde::{Deserialize, Serialize};

use crate::domain::session::{Session, SessionStatus};
use crate::ports::{
    SessionSummary as DomainSessionSummary, SessionView as DomainSessionView,
    UserProfile as DomainUserProfile,
};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a new session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub problem: String,
    #[serde(default)]
    pub difficulty: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// A session as stored, identities as plain ids.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub problem: String,
    pub difficulty: String,
    pub host: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant: Option<String>,
    pub call_id: String,
    pub status: SessionStatus,
    pub created_at: String,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id().to_string(),
            problem: session.problem().to_string(),
            difficulty: session.difficulty().to_string(),
            host: session.host().to_string(),
            participant: session.participant().map(|p| p.to_string()),
            call_id: session.call_id().to_string(),
            status: session.status(),
            created_at: session.created_at().as_datetime().to_rfc3339(),
        }
    }
}

/// Expanded user display data.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfileResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

impl From<DomainUserProfile> for UserProfileResponse {
    fn from(profile: DomainUserProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            name: profile.name,
            email: profile.email,
            image_url: profile.image_url,
            external_id: profile.external_id,
        }
    }
}

/// A session with host/participant expanded.
#[derive(Debug, Clone, Serialize)]
pub struct SessionViewResponse {
    pub id: String,
    pub problem: String,
    pub difficulty: String,
    pub host: UserProfileResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant: Option<UserProfileResponse>,
    pub call_id: String,
    pub status: SessionStatus,
    pub created_at: String,
}

impl From<DomainSessionView> for SessionViewResponse {
    fn from(view: DomainSessionView) -> Self {
        Self {
            id: view.id.to_string(),
            problem: view.problem,
            difficulty: view.difficulty,
            host: view.host.into(),
            participant: view.participant.map(Into::into),
            call_id: view.call_id.to_string(),
            status: view.status,
            created_at: view.created_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Flat history record.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummaryResponse {
    pub id: String,
    pub problem: String,
    pub difficulty: String,
    pub host: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant: Option<String>,
    pub call_id: String,
    pub status: SessionStatus,
    pub created_at: String,
}

impl From<DomainSessionSummary> for SessionSummaryResponse {
    fn from(summary: DomainSessionSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            problem: summary.problem,
            difficulty: summary.difficulty,
            host: summary.host.to_string(),
            participant: summary.participant.map(|p| p.to_string()),
            call_id: summary.call_id.to_string(),
            status: summary.status,
            created_at: summary.created_at.as_datetime().to_rfc3339(),
        }
    }
}

/// `{session}` envelope.
#[derive(Debug, Clone, Serialize)]
pub struct SessionEnvelope {
    pub session: SessionResponse,
}

/// `{session}` envelope with identities expanded.
#[derive(Debug, Clone, Serialize)]
pub struct SessionViewEnvelope {
    pub session: SessionViewResponse,
}

/// `{sessions}` envelope for the active list.
#[derive(Debug, Clone, Serialize)]
pub struct ActiveSessionsResponse {
    pub sessions: Vec<SessionViewResponse>,
}

/// `{sessions}` envelope for the history list.
#[derive(Debug, Clone, Serialize)]
pub struct RecentSessionsResponse {
    pub sessions: Vec<SessionSummaryResponse>,
}

/// `{session, message}` envelope for end-session.
#[derive(Debug, Clone, Serialize)]
pub struct EndSessionResponse {
    pub session: SessionResponse,
    pub message: String,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::new("INTERNAL_ERROR", "Internal Server Error")
    }
}
