//! Session repository port (write side).
//!
//! Defines the contract for persisting Session aggregates.
//!
//! # Design
//!
//! - **Write-focused**: reads here exist to drive mutations
//! - **Atomic claim**: the participant slot is taken via a single
//!   conditional update at the store, never read-then-write

use crate::domain::foundation::{DomainError, SessionId, UserId};
use crate::domain::session::Session;
use async_trait::async_trait;

/// Repository port for Session aggregate persistence.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Insert a new session.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, session: &Session) -> Result<(), DomainError>;

    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError>;

    /// Atomically claim the participant slot.
    ///
    /// Succeeds only when the session exists, is active, has no
    /// participant, and is not hosted by `participant` - evaluated as
    /// a single conditional update so that of two concurrent claims
    /// exactly one wins. Returns the updated session, or `None` when
    /// the precondition did not hold (not found, occupied, completed,
    /// or self-join).
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn claim_participant(
        &self,
        id: &SessionId,
        participant: &UserId,
    ) -> Result<Option<Session>, DomainError>;

    /// Update an existing session (status transition).
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, session: &Session) -> Result<(), DomainError>;

    /// Delete a session record.
    ///
    /// Only used as the compensating action when provider provisioning
    /// fails after creation.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &SessionId) -> Result<(), DomainError>;
}
