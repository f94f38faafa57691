//! PostgreSQL implementation of SessionRepository.
//!
//! The participant claim is a single conditional `UPDATE ... RETURNING`,
//! so the {active, unclaimed, not host} precondition and the write are
//! one statement - of two concurrent joiners only one row update can
//! match.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    CallId, DomainError, ErrorCode, SessionId, Timestamp, UserId,
};
use crate::domain::session::{Session, SessionStatus};
use crate::ports::SessionRepository;

/// PostgreSQL implementation of SessionRepository.
#[derive(Clone)]
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    /// Creates a new PostgresSessionRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SESSION_COLUMNS: &str =
    "id, problem, difficulty, host_id, participant_id, call_id, status, created_at";

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn insert(&self, session: &Session) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (
                id, problem, difficulty, host_id, participant_id, call_id, status, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.problem())
        .bind(session.difficulty())
        .bind(session.host().as_str())
        .bind(session.participant().map(|p| p.as_str()))
        .bind(session.call_id().as_str())
        .bind(session.status().as_str())
        .bind(session.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert session: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM sessions WHERE id = $1",
            SESSION_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch session: {}", e),
            )
        })?;

        row.map(row_to_session).transpose()
    }

    async fn claim_participant(
        &self,
        id: &SessionId,
        participant: &UserId,
    ) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE sessions
            SET participant_id = $2
            WHERE id = $1
              AND status = 'active'
              AND participant_id IS NULL
              AND host_id <> $2
            RETURNING {}
            "#,
            SESSION_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(participant.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to claim participant slot: {}", e),
            )
        })?;

        row.map(row_to_session).transpose()
    }

    async fn update(&self, session: &Session) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE sessions SET
                participant_id = $2,
                status = $3
            WHERE id = $1
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.participant().map(|p| p.as_str()))
        .bind(session.status().as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update session: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", session.id()),
            ));
        }

        Ok(())
    }

    async fn delete(&self, id: &SessionId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete session: {}", e),
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", id),
            ));
        }

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn column_error(column: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to get {}: {}", column, e),
    )
}

fn row_to_session(row: sqlx::postgres::PgRow) -> Result<Session, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| column_error("id", e))?;
    let problem: String = row
        .try_get("problem")
        .map_err(|e| column_error("problem", e))?;
    let difficulty: String = row
        .try_get("difficulty")
        .map_err(|e| column_error("difficulty", e))?;
    let host_id: String = row
        .try_get("host_id")
        .map_err(|e| column_error("host_id", e))?;
    let participant_id: Option<String> = row
        .try_get("participant_id")
        .map_err(|e| column_error("participant_id", e))?;
    let call_id: String = row
        .try_get("call_id")
        .map_err(|e| column_error("call_id", e))?;
    let status_str: String = row
        .try_get("status")
        .map_err(|e| column_error("status", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| column_error("created_at", e))?;

    let status = SessionStatus::parse(&status_str).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid session status: {}", status_str),
        )
    })?;

    let host = UserId::new(host_id)
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Invalid host_id: {}", e)))?;
    let participant = participant_id
        .map(|p| {
            UserId::new(p).map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Invalid participant_id: {}", e),
                )
            })
        })
        .transpose()?;
    let call_id = CallId::new(call_id).map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid call_id: {}", e))
    })?;

    Ok(Session::reconstitute(
        SessionId::from_uuid(id),
        problem,
        difficulty,
        host,
        participant,
        call_id,
        status,
        Timestamp::from_datetime(created_at),
    ))
}
