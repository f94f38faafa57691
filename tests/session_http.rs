//! Integration tests for the session HTTP endpoints.
//!
//! Full router with auth middleware, driven through `tower::ServiceExt`,
//! asserting the status codes and JSON shapes each endpoint exposes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    middleware, Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use pairview::adapters::auth::MockTokenVerifier;
use pairview::adapters::comms::MockCommsProvider;
use pairview::adapters::http::middleware::{auth_middleware, AuthState};
use pairview::adapters::http::{session_routes, SessionHandlers};
use pairview::application::handlers::session::{
    CreateSessionHandler, EndSessionHandler, GetSessionHandler, JoinSessionHandler,
    ListActiveSessionsHandler, ListMyRecentSessionsHandler,
};
use pairview::domain::foundation::{DomainError, ErrorCode, SessionId, UserId};
use pairview::domain::session::{Session, SessionStatus};
use pairview::ports::{
    SessionReader, SessionRepository, SessionSummary, SessionView, TokenVerifier, UserProfile,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

type SharedStore = Arc<Mutex<HashMap<SessionId, Session>>>;

struct InMemorySessionRepository {
    store: SharedStore,
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn insert(&self, session: &Session) -> Result<(), DomainError> {
        self.store
            .lock()
            .unwrap()
            .insert(*session.id(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        Ok(self.store.lock().unwrap().get(id).cloned())
    }

    async fn claim_participant(
        &self,
        id: &SessionId,
        participant: &UserId,
    ) -> Result<Option<Session>, DomainError> {
        let mut store = self.store.lock().unwrap();
        match store.get_mut(id) {
            Some(session)
                if session.status().is_active()
                    && session.participant().is_none()
                    && !session.is_host(participant) =>
            {
                session.set_participant(participant.clone());
                Ok(Some(session.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn update(&self, session: &Session) -> Result<(), DomainError> {
        let mut store = self.store.lock().unwrap();
        if !store.contains_key(session.id()) {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                "Session not found",
            ));
        }
        store.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn delete(&self, id: &SessionId) -> Result<(), DomainError> {
        self.store
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DomainError::new(ErrorCode::SessionNotFound, "Session not found"))
    }
}

struct InMemorySessionReader {
    store: SharedStore,
}

impl InMemorySessionReader {
    fn profile(user_id: &UserId) -> UserProfile {
        UserProfile {
            id: user_id.clone(),
            name: Some(user_id.as_str().to_string()),
            email: None,
            image_url: None,
            external_id: Some(format!("ext-{}", user_id.as_str())),
        }
    }

    fn view(session: &Session) -> SessionView {
        SessionView {
            id: *session.id(),
            problem: session.problem().to_string(),
            difficulty: session.difficulty().to_string(),
            host: Self::profile(session.host()),
            participant: session.participant().map(Self::profile),
            call_id: session.call_id().clone(),
            status: session.status(),
            created_at: *session.created_at(),
        }
    }

    fn summary(session: &Session) -> SessionSummary {
        SessionSummary {
            id: *session.id(),
            problem: session.problem().to_string(),
            difficulty: session.difficulty().to_string(),
            host: session.host().clone(),
            participant: session.participant().cloned(),
            call_id: session.call_id().clone(),
            status: session.status(),
            created_at: *session.created_at(),
        }
    }
}

#[async_trait]
impl SessionReader for InMemorySessionReader {
    async fn get_by_id(&self, id: &SessionId) -> Result<Option<SessionView>, DomainError> {
        Ok(self.store.lock().unwrap().get(id).map(Self::view))
    }

    async fn list_active(&self, limit: u32) -> Result<Vec<SessionView>, DomainError> {
        let store = self.store.lock().unwrap();
        let mut sessions: Vec<&Session> = store
            .values()
            .filter(|s| s.status() == SessionStatus::Active)
            .collect();
        sessions.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        Ok(sessions
            .into_iter()
            .take(limit as usize)
            .map(Self::view)
            .collect())
    }

    async fn list_completed_for_user(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<SessionSummary>, DomainError> {
        let store = self.store.lock().unwrap();
        let mut sessions: Vec<&Session> = store
            .values()
            .filter(|s| {
                s.status() == SessionStatus::Completed
                    && (s.host() == user_id || s.participant() == Some(user_id))
            })
            .collect();
        sessions.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        Ok(sessions
            .into_iter()
            .take(limit as usize)
            .map(Self::summary)
            .collect())
    }
}

/// Builds the app the way `main` does: session routes behind the auth
/// middleware, with three known bearer tokens.
fn test_app() -> Router {
    let store: SharedStore = Arc::new(Mutex::new(HashMap::new()));
    let repository: Arc<dyn SessionRepository> = Arc::new(InMemorySessionRepository {
        store: store.clone(),
    });
    let reader: Arc<dyn SessionReader> = Arc::new(InMemorySessionReader { store });
    let comms = Arc::new(MockCommsProvider::new());

    let handlers = SessionHandlers::new(
        Arc::new(CreateSessionHandler::new(repository.clone(), comms.clone())),
        Arc::new(JoinSessionHandler::new(repository.clone(), comms.clone())),
        Arc::new(EndSessionHandler::new(repository, comms)),
        Arc::new(GetSessionHandler::new(reader.clone())),
        Arc::new(ListActiveSessionsHandler::new(reader.clone())),
        Arc::new(ListMyRecentSessionsHandler::new(reader)),
    );

    let verifier: AuthState = Arc::new(
        MockTokenVerifier::new()
            .with_user("token-alice", "alice", "ext-alice")
            .with_user("token-bob", "bob", "ext-bob")
            .with_user("token-carol", "carol", "ext-carol"),
    ) as Arc<dyn TokenVerifier>;

    Router::new()
        .nest("/api/sessions", session_routes(handlers))
        .layer(middleware::from_fn_with_state(verifier, auth_middleware))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_session(app: &Router, token: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/sessions",
        Some(token),
        Some(json!({"problem": "Two Sum", "difficulty": "easy"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["session"]["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn requests_without_token_are_unauthorized() {
    let app = test_app();
    let (status, _) = send(&app, Method::GET, "/api/sessions/active", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_returns_201_with_session_envelope() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/sessions",
        Some("token-alice"),
        Some(json!({"problem": "Two Sum", "difficulty": "easy"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["session"]["problem"], "Two Sum");
    assert_eq!(body["session"]["host"], "alice");
    assert_eq!(body["session"]["status"], "active");
    assert!(body["session"]["participant"].is_null());
    assert!(body["session"]["call_id"]
        .as_str()
        .unwrap()
        .starts_with("session-"));
}

#[tokio::test]
async fn create_without_problem_is_400() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/sessions",
        Some("token-alice"),
        Some(json!({"difficulty": "easy"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn get_unknown_session_is_404() {
    let app = test_app();
    let uri = format!("/api/sessions/{}", SessionId::new());
    let (status, body) = send(&app, Method::GET, &uri, Some("token-alice"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn get_with_malformed_id_is_404() {
    let app = test_app();
    let (status, _) = send(
        &app,
        Method::GET,
        "/api/sessions/not-a-uuid",
        Some("token-alice"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_returns_expanded_host() {
    let app = test_app();
    let id = create_session(&app, "token-alice").await;

    let uri = format!("/api/sessions/{}", id);
    let (status, body) = send(&app, Method::GET, &uri, Some("token-bob"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["host"]["id"], "alice");
    assert_eq!(body["session"]["host"]["name"], "alice");
}

#[tokio::test]
async fn join_fills_the_slot_once() {
    let app = test_app();
    let id = create_session(&app, "token-alice").await;
    let uri = format!("/api/sessions/{}/join", id);

    let (status, body) = send(&app, Method::POST, &uri, Some("token-bob"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["participant"], "bob");

    // The slot is taken
    let (status, body) = send(&app, Method::POST, &uri, Some("token-carol"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "SESSION_FULL");
}

#[tokio::test]
async fn host_cannot_join_own_session() {
    let app = test_app();
    let id = create_session(&app, "token-alice").await;
    let uri = format!("/api/sessions/{}/join", id);

    let (status, _) = send(&app, Method::POST, &uri, Some("token-alice"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn join_with_malformed_id_is_409() {
    let app = test_app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/sessions/not-a-uuid/join",
        Some("token-bob"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn only_the_host_can_end() {
    let app = test_app();
    let id = create_session(&app, "token-alice").await;
    let uri = format!("/api/sessions/{}/end", id);

    let (status, body) = send(&app, Method::POST, &uri, Some("token-bob"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn end_completes_and_double_end_is_400() {
    let app = test_app();
    let id = create_session(&app, "token-alice").await;
    let uri = format!("/api/sessions/{}/end", id);

    let (status, body) = send(&app, Method::POST, &uri, Some("token-alice"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Session ended successfully");
    assert_eq!(body["session"]["status"], "Completed");

    let (status, body) = send(&app, Method::POST, &uri, Some("token-alice"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_STATE");
}

#[tokio::test]
async fn ending_missing_session_is_404() {
    let app = test_app();
    let uri = format!("/api/sessions/{}/end", SessionId::new());
    let (status, _) = send(&app, Method::POST, &uri, Some("token-alice"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn active_list_excludes_completed_sessions() {
    let app = test_app();
    let open_id = create_session(&app, "token-alice").await;
    let closed_id = create_session(&app, "token-bob").await;

    let uri = format!("/api/sessions/{}/end", closed_id);
    let (status, _) = send(&app, Method::POST, &uri, Some("token-bob"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/sessions/active",
        Some("token-carol"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let sessions = body["sessions"].as_array().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["id"], open_id.as_str());
}

#[tokio::test]
async fn mine_lists_only_my_completed_sessions() {
    let app = test_app();
    let id = create_session(&app, "token-alice").await;

    let join_uri = format!("/api/sessions/{}/join", id);
    send(&app, Method::POST, &join_uri, Some("token-bob"), None).await;
    let end_uri = format!("/api/sessions/{}/end", id);
    send(&app, Method::POST, &end_uri, Some("token-alice"), None).await;

    for token in ["token-alice", "token-bob"] {
        let (status, body) = send(&app, Method::GET, "/api/sessions/mine", Some(token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sessions"].as_array().unwrap().len(), 1);
        assert_eq!(body["sessions"][0]["id"], id.as_str());
    }

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/sessions/mine",
        Some("token-carol"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["sessions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn mine_omits_sessions_still_in_progress() {
    let app = test_app();
    let finished_id = create_session(&app, "token-alice").await;
    let ongoing_id = create_session(&app, "token-alice").await;

    let join_uri = format!("/api/sessions/{}/join", ongoing_id);
    let (status, _) = send(&app, Method::POST, &join_uri, Some("token-bob"), None).await;
    assert_eq!(status, StatusCode::OK);
    let end_uri = format!("/api/sessions/{}/end", finished_id);
    let (status, _) = send(&app, Method::POST, &end_uri, Some("token-alice"), None).await;
    assert_eq!(status, StatusCode::OK);

    // Both as host and as participant, only the completed session shows
    let (status, body) = send(
        &app,
        Method::GET,
        "/api/sessions/mine",
        Some("token-alice"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let sessions = body["sessions"].as_array().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["id"], finished_id.as_str());

    let (status, body) = send(&app, Method::GET, "/api/sessions/mine", Some("token-bob"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["sessions"].as_array().unwrap().is_empty());
}
