//! CreateSessionHandler - creates a session with its provider resources.
//!
//! The session record and the provider's call + channel are created
//! together. If provisioning fails after the insert, the record is
//! deleted again so no active session exists without working
//! communication resources.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, SessionId};
use crate::domain::session::{Session, SessionError};
use crate::ports::{CallMetadata, CommsError, CommsProvider, SessionRepository};

/// Command to create a new session.
#[derive(Debug, Clone)]
pub struct CreateSessionCommand {
    pub problem: String,
    pub difficulty: String,
    pub user: AuthenticatedUser,
}

/// Handler for creating sessions.
pub struct CreateSessionHandler {
    repository: Arc<dyn SessionRepository>,
    comms: Arc<dyn CommsProvider>,
}

impl CreateSessionHandler {
    pub fn new(repository: Arc<dyn SessionRepository>, comms: Arc<dyn CommsProvider>) -> Self {
        Self { repository, comms }
    }

    pub async fn handle(&self, cmd: CreateSessionCommand) -> Result<Session, SessionError> {
        // 1. Build the aggregate (validates problem/difficulty, generates call_id)
        let session = Session::new(
            SessionId::new(),
            cmd.user.id.clone(),
            cmd.problem,
            cmd.difficulty,
        )?;

        // 2. Persist the record
        self.repository.insert(&session).await?;

        // 3. Provision the paired call + channel; roll the record back on failure
        if let Err(err) = self.provision(&session, &cmd.user).await {
            if let Err(delete_err) = self.repository.delete(session.id()).await {
                tracing::error!(
                    session_id = %session.id(),
                    error = %delete_err,
                    "compensating delete failed after provisioning error"
                );
            }
            return Err(SessionError::provider(err.to_string()));
        }

        Ok(session)
    }

    async fn provision(
        &self,
        session: &Session,
        user: &AuthenticatedUser,
    ) -> Result<(), CommsError> {
        let metadata = CallMetadata {
            session_id: session.id().to_string(),
            problem: session.problem().to_string(),
            difficulty: session.difficulty().to_string(),
        };
        self.comms
            .create_call(session.call_id(), &user.external_id, metadata)
            .await?;

        let channel_name = format!("{} Session", session.problem());
        self.comms
            .create_channel(
                session.call_id(),
                &channel_name,
                &user.external_id,
                std::slice::from_ref(&user.external_id),
            )
            .await?;

        Ok(())
    }
}
