//! HTTP handlers for session endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::session::{
    CreateSessionCommand, CreateSessionHandler, EndSessionCommand, EndSessionHandler,
    GetSessionHandler, GetSessionQuery, JoinSessionCommand, JoinSessionHandler,
    ListActiveSessionsHandler, ListMyRecentSessionsHandler, ListMyRecentSessionsQuery,
};
use crate::domain::foundation::SessionId;
use crate::domain::session::SessionError;

use super::dto::{
    ActiveSessionsResponse, CreateSessionRequest, EndSessionResponse, ErrorResponse,
    RecentSessionsResponse, SessionEnvelope, SessionResponse, SessionViewEnvelope,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SessionHandlers {
    create_handler: Arc<CreateSessionHandler>,
    join_handler: Arc<JoinSessionHandler>,
    end_handler: Arc<EndSessionHandler>,
    get_handler: Arc<GetSessionHandler>,
    list_active_handler: Arc<ListActiveSessionsHandler>,
    list_recent_handler: Arc<ListMyRecentSessionsHandler>,
}

impl SessionHandlers {
    pub fn new(
        create_handler: Arc<CreateSessionHandler>,
        join_handler: Arc<JoinSessionHandler>,
        end_handler: Arc<EndSessionHandler>,
        get_handler: Arc<GetSessionHandler>,
        list_active_handler: Arc<ListActiveSessionsHandler>,
        list_recent_handler: Arc<ListMyRecentSessionsHandler>,
    ) -> Self {
        Self {
            create_handler,
            join_handler,
            end_handler,
            get_handler,
            list_active_handler,
            list_recent_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/sessions - Create a new session
pub async fn create_session(
    State(handlers): State<SessionHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreateSessionRequest>,
) -> Response {
    let cmd = CreateSessionCommand {
        problem: req.problem,
        difficulty: req.difficulty,
        user,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(session) => (
            StatusCode::CREATED,
            Json(SessionEnvelope {
                session: SessionResponse::from(&session),
            }),
        )
            .into_response(),
        Err(e) => handle_session_error("create_session", e),
    }
}

/// GET /api/sessions/active - List joinable sessions
pub async fn get_active_sessions(
    State(handlers): State<SessionHandlers>,
    RequireAuth(_user): RequireAuth,
) -> Response {
    match handlers.list_active_handler.handle().await {
        Ok(sessions) => (
            StatusCode::OK,
            Json(ActiveSessionsResponse {
                sessions: sessions.into_iter().map(Into::into).collect(),
            }),
        )
            .into_response(),
        Err(e) => handle_session_error("get_active_sessions", e),
    }
}

/// GET /api/sessions/mine - List the user's completed sessions
pub async fn get_my_recent_sessions(
    State(handlers): State<SessionHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let query = ListMyRecentSessionsQuery { user_id: user.id };

    match handlers.list_recent_handler.handle(query).await {
        Ok(sessions) => (
            StatusCode::OK,
            Json(RecentSessionsResponse {
                sessions: sessions.into_iter().map(Into::into).collect(),
            }),
        )
            .into_response(),
        Err(e) => handle_session_error("get_my_recent_sessions", e),
    }
}

/// GET /api/sessions/:id - Get session details
pub async fn get_session(
    State(handlers): State<SessionHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(session_id): Path<String>,
) -> Response {
    // A malformed id cannot match any session
    let Ok(session_id) = session_id.parse::<SessionId>() else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("NOT_FOUND", "Session not found")),
        )
            .into_response();
    };

    match handlers.get_handler.handle(GetSessionQuery { session_id }).await {
        Ok(view) => (
            StatusCode::OK,
            Json(SessionViewEnvelope {
                session: view.into(),
            }),
        )
            .into_response(),
        Err(e) => handle_session_error("get_session", e),
    }
}

/// POST /api/sessions/:id/join - Join as participant
pub async fn join_session(
    State(handlers): State<SessionHandlers>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
) -> Response {
    // A malformed id falls under the uniform join conflict
    let Ok(session_id) = session_id.parse::<SessionId>() else {
        return (
            StatusCode::CONFLICT,
            Json(ErrorResponse::new(
                "SESSION_FULL",
                "Session is full or unavailable",
            )),
        )
            .into_response();
    };

    let cmd = JoinSessionCommand { session_id, user };

    match handlers.join_handler.handle(cmd).await {
        Ok(session) => (
            StatusCode::OK,
            Json(SessionEnvelope {
                session: SessionResponse::from(&session),
            }),
        )
            .into_response(),
        Err(e) => handle_session_error("join_session", e),
    }
}

/// POST /api/sessions/:id/end - End the session (host only)
pub async fn end_session(
    State(handlers): State<SessionHandlers>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
) -> Response {
    let Ok(session_id) = session_id.parse::<SessionId>() else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("NOT_FOUND", "Session not found")),
        )
            .into_response();
    };

    let cmd = EndSessionCommand { session_id, user };

    match handlers.end_handler.handle(cmd).await {
        Ok(session) => (
            StatusCode::OK,
            Json(EndSessionResponse {
                session: SessionResponse::from(&session),
                message: "Session ended successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => handle_session_error("end_session", e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

/// Maps a `SessionError` to an HTTP response.
///
/// Provider and infrastructure detail is logged with the operation
/// name and never returned to the client.
fn handle_session_error(operation: &str, error: SessionError) -> Response {
    match error {
        SessionError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("NOT_FOUND", "Session not found")),
        )
            .into_response(),
        SessionError::Forbidden => (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::new(
                "FORBIDDEN",
                "Only the host can end the session",
            )),
        )
            .into_response(),
        SessionError::Conflict(message) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::new("SESSION_FULL", message)),
        )
            .into_response(),
        SessionError::InvalidState(message) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("INVALID_STATE", message)),
        )
            .into_response(),
        SessionError::ValidationFailed { message, .. } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("VALIDATION_FAILED", message)),
        )
            .into_response(),
        SessionError::Provider(message) | SessionError::Infrastructure(message) => {
            tracing::error!("Error in {}: {}", operation, message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal()),
            )
                .into_response()
        }
    }
}
