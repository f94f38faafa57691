//! PostgreSQL implementation of SessionReader.
//!
//! Joins the auth collaborator's `users` table to expand host and
//! participant display data.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{CallId, DomainError, ErrorCode, SessionId, Timestamp, UserId};
use crate::domain::session::SessionStatus;
use crate::ports::{SessionReader, SessionSummary, SessionView, UserProfile};

/// PostgreSQL implementation of SessionReader.
#[derive(Clone)]
pub struct PostgresSessionReader {
    pool: PgPool,
}

impl PostgresSessionReader {
    /// Creates a new PostgresSessionReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const VIEW_QUERY: &str = r#"
    SELECT s.id, s.problem, s.difficulty, s.call_id, s.status, s.created_at,
           s.host_id, h.name AS host_name, h.email AS host_email,
           h.image_url AS host_image_url, h.external_id AS host_external_id,
           s.participant_id, p.name AS participant_name, p.email AS participant_email,
           p.image_url AS participant_image_url, p.external_id AS participant_external_id
    FROM sessions s
    LEFT JOIN users h ON h.id = s.host_id
    LEFT JOIN users p ON p.id = s.participant_id
"#;

#[async_trait]
impl SessionReader for PostgresSessionReader {
    async fn get_by_id(&self, id: &SessionId) -> Result<Option<SessionView>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE s.id = $1", VIEW_QUERY))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch session view: {}", e),
                )
            })?;

        row.map(row_to_view).transpose()
    }

    async fn list_active(&self, limit: u32) -> Result<Vec<SessionView>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE s.status = 'active' ORDER BY s.created_at DESC LIMIT $1",
            VIEW_QUERY
        ))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list active sessions: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_view).collect()
    }

    async fn list_completed_for_user(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<SessionSummary>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, problem, difficulty, host_id, participant_id, call_id, status, created_at
            FROM sessions
            WHERE status = 'Completed'
              AND (host_id = $1 OR participant_id = $1)
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id.as_str())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list completed sessions: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_summary).collect()
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

fn parse_status(s: &str) -> Result<SessionStatus, DomainError> {
    SessionStatus::parse(s).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid session status: {}", s),
        )
    })
}

fn user_profile(row: &PgRow, prefix: &str, id: String) -> Result<UserProfile, DomainError> {
    let column = |name: &str| format!("{}_{}", prefix, name);
    Ok(UserProfile {
        id: UserId::new(id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid user id: {}", e))
        })?,
        name: row
            .try_get(column("name").as_str())
            .map_err(|e| column_error("name", e))?,
        email: row
            .try_get(column("email").as_str())
            .map_err(|e| column_error("email", e))?,
        image_url: row
            .try_get(column("image_url").as_str())
            .map_err(|e| column_error("image_url", e))?,
        external_id: row
            .try_get(column("external_id").as_str())
            .map_err(|e| column_error("external_id", e))?,
    })
}

fn row_to_view(row: PgRow) -> Result<SessionView, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| column_error("id", e))?;
    let host_id: String = row
        .try_get("host_id")
        .map_err(|e| column_error("host_id", e))?;
    let participant_id: Option<String> = row
        .try_get("participant_id")
        .map_err(|e| column_error("participant_id", e))?;
    let status_str: String = row
        .try_get("status")
        .map_err(|e| column_error("status", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| column_error("created_at", e))?;
    let call_id: String = row
        .try_get("call_id")
        .map_err(|e| column_error("call_id", e))?;

    let host = user_profile(&row, "host", host_id)?;
    let participant = participant_id
        .map(|pid| user_profile(&row, "participant", pid))
        .transpose()?;

    Ok(SessionView {
        id: SessionId::from_uuid(id),
        problem: row
            .try_get("problem")
            .map_err(|e| column_error("problem", e))?,
        difficulty: row
            .try_get("difficulty")
            .map_err(|e| column_error("difficulty", e))?,
        host,
        participant,
        call_id: CallId::new(call_id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid call_id: {}", e))
        })?,
        status: parse_status(&status_str)?,
        created_at: Timestamp::from_datetime(created_at),
    })
}

fn row_to_summary(row: PgRow) -> Result<SessionSummary, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| column_error("id", e))?;
    let host_id: String = row
        .try_get("host_id")
        .map_err(|e| column_error("host_id", e))?;
    let participant_id: Option<String> = row
        .try_get("participant_id")
        .map_err(|e| column_error("participant_id", e))?;
    let status_str: String = row
        .try_get("status")
        .map_err(|e| column_error("status", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| column_error("created_at", e))?;
    let call_id: String = row
        .try_get("call_id")
        .map_err(|e| column_error("call_id", e))?;

    Ok(SessionSummary {
        id: SessionId::from_uuid(id),
        problem: row
            .try_get("problem")
            .map_err(|e| column_error("problem", e))?,
        difficulty: row
            .try_get("difficulty")
            .map_err(|e| column_error("difficulty", e))?,
        host: UserId::new(host_id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid host_id: {}", e))
        })?,
        participant: participant_id
            .map(|p| {
                UserId::new(p).map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Invalid participant_id: {}", e),
                    )
                })
            })
            .transpose()?,
        call_id: CallId::new(call_id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid call_id: {}", e))
        })?,
        status: parse_status(&status_str)?,
        created_at: Timestamp::from_datetime(created_at),
    })
}
