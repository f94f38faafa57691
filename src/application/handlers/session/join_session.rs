//! JoinSessionHandler - claims the single participant slot.
//!
//! Correctness lives in the repository's atomic conditional update:
//! two concurrent joins cannot both observe an empty slot, because the
//! store evaluates {active, unclaimed, not host} and writes in one
//! step. The loser gets no row back and is answered with a conflict.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, SessionId};
use crate::domain::session::{Session, SessionError};
use crate::ports::{CommsProvider, SessionRepository};

/// Command to join a session as participant.
#[derive(Debug, Clone)]
pub struct JoinSessionCommand {
    pub session_id: SessionId,
    pub user: AuthenticatedUser,
}

/// Handler for joining sessions.
pub struct JoinSessionHandler {
    repository: Arc<dyn SessionRepository>,
    comms: Arc<dyn CommsProvider>,
}

impl JoinSessionHandler {
    pub fn new(repository: Arc<dyn SessionRepository>, comms: Arc<dyn CommsProvider>) -> Self {
        Self { repository, comms }
    }

    pub async fn handle(&self, cmd: JoinSessionCommand) -> Result<Session, SessionError> {
        // 1. Atomic claim; covers not-found, occupied, and completed uniformly
        let session = self
            .repository
            .claim_participant(&cmd.session_id, &cmd.user.id)
            .await?
            .ok_or_else(|| SessionError::conflict("Session is full or unavailable"))?;

        // 2. Re-validate the claimed state. Unreachable with a
        //    conforming store; kept as an assertion on the claim contract.
        session.verify_joined_by(&cmd.user.id)?;

        // 3. Add the joiner to the chat channel
        self.comms
            .add_channel_member(session.call_id(), &cmd.user.external_id)
            .await
            .map_err(|e| SessionError::provider(e.to_string()))?;

        Ok(session)
    }
}
