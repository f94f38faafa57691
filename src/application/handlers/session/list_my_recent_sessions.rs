//! ListMyRecentSessionsHandler - a user's completed-session history.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::session::SessionError;
use crate::ports::{SessionReader, SessionSummary};

use super::SESSION_LIST_LIMIT;

/// Query for a user's completed sessions.
#[derive(Debug, Clone)]
pub struct ListMyRecentSessionsQuery {
    pub user_id: UserId,
}

/// Handler for the session history list.
pub struct ListMyRecentSessionsHandler {
    reader: Arc<dyn SessionReader>,
}

impl ListMyRecentSessionsHandler {
    pub fn new(reader: Arc<dyn SessionReader>) -> Self {
        Self { reader }
    }

    /// Completed sessions where the user was host or participant,
    /// newest-first, capped at 20.
    pub async fn handle(
        &self,
        query: ListMyRecentSessionsQuery,
    ) -> Result<Vec<SessionSummary>, SessionError> {
        Ok(self
            .reader
            .list_completed_for_user(&query.user_id, SESSION_LIST_LIMIT)
            .await?)
    }
}
