//! EndSessionHandler - host-only terminal transition.
//!
//! Tears down the provider call and channel, then persists the status
//! change. A failure between the two leaves the record active with the
//! provider resources partially deleted; there is no reconciliation
//! path, matching the documented behavior.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, SessionId};
use crate::domain::session::{Session, SessionError};
use crate::ports::{CommsProvider, SessionRepository};

/// Command to end a session.
#[derive(Debug, Clone)]
pub struct EndSessionCommand {
    pub session_id: SessionId,
    pub user: AuthenticatedUser,
}

/// Handler for ending sessions.
pub struct EndSessionHandler {
    repository: Arc<dyn SessionRepository>,
    comms: Arc<dyn CommsProvider>,
}

impl EndSessionHandler {
    pub fn new(repository: Arc<dyn SessionRepository>, comms: Arc<dyn CommsProvider>) -> Self {
        Self { repository, comms }
    }

    pub async fn handle(&self, cmd: EndSessionCommand) -> Result<Session, SessionError> {
        let mut session = self
            .repository
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(SessionError::NotFound(cmd.session_id))?;

        session.authorize_host(&cmd.user.id)?;

        if !session.status().is_active() {
            return Err(SessionError::invalid_state("Session is already completed"));
        }

        // Hard-delete the call, then the channel
        self.comms
            .delete_call(session.call_id())
            .await
            .map_err(|e| SessionError::provider(e.to_string()))?;
        self.comms
            .delete_channel(session.call_id())
            .await
            .map_err(|e| SessionError::provider(e.to_string()))?;

        session.complete()?;
        self.repository.update(&session).await?;

        Ok(session)
    }
}
