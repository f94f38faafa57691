//! ListActiveSessionsHandler - the open-sessions lobby view.

use std::sync::Arc;

use crate::domain::session::SessionError;
use crate::ports::{SessionReader, SessionView};

use super::SESSION_LIST_LIMIT;

/// Handler for listing joinable sessions.
pub struct ListActiveSessionsHandler {
    reader: Arc<dyn SessionReader>,
}

impl ListActiveSessionsHandler {
    pub fn new(reader: Arc<dyn SessionReader>) -> Self {
        Self { reader }
    }

    /// Active sessions, newest-first, host expanded, capped at 20.
    pub async fn handle(&self) -> Result<Vec<SessionView>, SessionError> {
        Ok(self.reader.list_active(SESSION_LIST_LIMIT).await?)
    }
}
