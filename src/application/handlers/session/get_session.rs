//! GetSessionHandler - single-session lookup with identities expanded.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::SessionError;
use crate::ports::{SessionReader, SessionView};

/// Query for a single session.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
}

/// Handler for session lookup.
pub struct GetSessionHandler {
    reader: Arc<dyn SessionReader>,
}

impl GetSessionHandler {
    pub fn new(reader: Arc<dyn SessionReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<SessionView, SessionError> {
        self.reader
            .get_by_id(&query.session_id)
            .await?
            .ok_or(SessionError::NotFound(query.session_id))
    }
}
