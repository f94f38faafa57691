//! Session aggregate entity.
//!
//! A session is created by a host around a coding problem, holds at
//! most one participant, and is correlated to a video call and chat
//! channel on the communications provider by its `call_id`.
//!
//! # Invariants
//!
//! - `problem` and `difficulty` are non-empty
//! - `participant`, once set, never changes and is never the host
//! - `status` transitions only `Active -> Completed`, exactly once
//! - `call_id` and `created_at` are immutable

use crate::domain::foundation::{
    CallId, DomainError, ErrorCode, SessionId, Timestamp, UserId,
};
use serde::{Deserialize, Serialize};

use super::SessionStatus;

/// Interview session aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for this session.
    id: SessionId,

    /// Coding problem the session is about.
    problem: String,

    /// Problem difficulty label.
    difficulty: String,

    /// User who created the session; sole authority to end it.
    host: UserId,

    /// The single joined participant, if any.
    participant: Option<UserId>,

    /// Correlation key for the provider's call and channel.
    call_id: CallId,

    /// Current lifecycle status.
    status: SessionStatus,

    /// When the session was created.
    created_at: Timestamp,
}

impl Session {
    /// Create a new active session with a freshly generated call id.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if problem or difficulty is empty
    pub fn new(
        id: SessionId,
        host: UserId,
        problem: String,
        difficulty: String,
    ) -> Result<Self, DomainError> {
        if problem.trim().is_empty() {
            return Err(DomainError::validation("problem", "Problem is required"));
        }
        if difficulty.trim().is_empty() {
            return Err(DomainError::validation(
                "difficulty",
                "Difficulty is required",
            ));
        }

        Ok(Self {
            id,
            problem,
            difficulty,
            host,
            participant: None,
            call_id: CallId::generate(),
            status: SessionStatus::Active,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute a session from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SessionId,
        problem: String,
        difficulty: String,
        host: UserId,
        participant: Option<UserId>,
        call_id: CallId,
        status: SessionStatus,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            problem,
            difficulty,
            host,
            participant,
            call_id,
            status,
            created_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the session ID.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the coding problem.
    pub fn problem(&self) -> &str {
        &self.problem
    }

    /// Returns the difficulty label.
    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    /// Returns the host's user ID.
    pub fn host(&self) -> &UserId {
        &self.host
    }

    /// Returns the participant's user ID, if joined.
    pub fn participant(&self) -> Option<&UserId> {
        self.participant.as_ref()
    }

    /// Returns the provider correlation key.
    pub fn call_id(&self) -> &CallId {
        &self.call_id
    }

    /// Returns the current status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Returns when the session was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks if the given user is the host.
    pub fn is_host(&self, user_id: &UserId) -> bool {
        &self.host == user_id
    }

    /// Validates that the user may end this session.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if user is not the host
    pub fn authorize_host(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_host(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "Only the host can end the session",
            ))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Re-validates the joined state after the store-level claim.
    ///
    /// The atomic conditional update in the repository is the actual
    /// correctness mechanism; these checks reproduce the original
    /// error surface and should never fire on a conforming store.
    ///
    /// # Errors
    ///
    /// - `SessionCompleted` if the session is no longer active
    /// - `InvalidStateTransition` if the joiner is the host
    /// - `SessionFull` if another participant is already set
    pub fn verify_joined_by(&self, user_id: &UserId) -> Result<(), DomainError> {
        if !self.status.is_active() {
            return Err(DomainError::new(
                ErrorCode::SessionCompleted,
                "Cannot join a completed session",
            ));
        }
        if self.is_host(user_id) {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Host cannot join their own session as participant",
            ));
        }
        match &self.participant {
            Some(p) if p != user_id => Err(DomainError::new(
                ErrorCode::SessionFull,
                "Session is already full",
            )),
            _ => Ok(()),
        }
    }

    /// Complete the session (terminal).
    ///
    /// # Errors
    ///
    /// - `SessionCompleted` if already completed
    pub fn complete(&mut self) -> Result<(), DomainError> {
        if !self.status.can_transition_to(&SessionStatus::Completed) {
            return Err(DomainError::new(
                ErrorCode::SessionCompleted,
                "Session is already completed",
            ));
        }

        self.status = SessionStatus::Completed;
        Ok(())
    }

    /// Sets the participant directly.
    ///
    /// Only for store adapters and tests reconstructing the claimed
    /// state; production joins go through the repository's atomic
    /// conditional update.
    pub fn set_participant(&mut self, user_id: UserId) {
        self.participant = Some(user_id);
    }
}
