//! Route table for session endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_session, end_session, get_active_sessions, get_my_recent_sessions, get_session,
    join_session, SessionHandlers,
};

/// Builds the session router. Mounted under `/api/sessions`.
pub fn session_routes(handlers: SessionHandlers) -> Router {
    Router::new()
        .route("/", post(create_session))
        .route("/active", get(get_active_sessions))
        .route("/mine", get(get_my_recent_sessions))
        .route("/:id", get(get_session))
        .route("/:id/join", post(join_session))
        .route("/:id/end", post(end_session))
        .with_state(handlers)
}
