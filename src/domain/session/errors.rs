//! Session-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, SessionId};

/// Session-specific errors.
///
/// Each variant maps to a single HTTP status at the adapter boundary;
/// `Provider` and `Infrastructure` are surfaced as generic 500s with
/// detail logged server-side only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Session was not found.
    NotFound(SessionId),
    /// Actor lacks permission for the mutation.
    Forbidden,
    /// Concurrent-join precondition lost or slot already taken.
    Conflict(String),
    /// Invalid state transition attempted.
    InvalidState(String),
    /// Required input was missing or malformed.
    ValidationFailed { field: String, message: String },
    /// Communications provider call failed.
    Provider(String),
    /// Store or other infrastructure failure.
    Infrastructure(String),
}

impl SessionError {
    pub fn not_found(id: SessionId) -> Self {
        SessionError::NotFound(id)
    }

    pub fn forbidden() -> Self {
        SessionError::Forbidden
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        SessionError::Conflict(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        SessionError::InvalidState(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SessionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn provider(message: impl Into<String>) -> Self {
        SessionError::Provider(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SessionError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
            SessionError::Forbidden => ErrorCode::Forbidden,
            SessionError::Conflict(_) => ErrorCode::SessionFull,
            SessionError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            SessionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SessionError::Provider(_) => ErrorCode::CommsProviderError,
            SessionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            SessionError::NotFound(id) => format!("Session not found: {}", id),
            SessionError::Forbidden => "Permission denied".to_string(),
            SessionError::Conflict(msg) => msg.clone(),
            SessionError::InvalidState(msg) => msg.clone(),
            SessionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SessionError::Provider(msg) => format!("Provider error: {}", msg),
            SessionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SessionError {}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SessionNotFound => {
                SessionError::Infrastructure(err.to_string())
            }
            ErrorCode::Forbidden | ErrorCode::Unauthorized => SessionError::Forbidden,
            ErrorCode::SessionCompleted | ErrorCode::InvalidStateTransition => {
                SessionError::InvalidState(err.message)
            }
            ErrorCode::SessionFull => SessionError::Conflict(err.message),
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                SessionError::ValidationFailed {
                    field: err
                        .details
                        .get("field")
                        .cloned()
                        .unwrap_or_else(|| "unknown".to_string()),
                    message: err.message,
                }
            }
            ErrorCode::CommsProviderError => SessionError::Provider(err.message),
            _ => SessionError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_carries_session_id() {
        let id = SessionId::new();
        let err = SessionError::not_found(id);
        assert!(err.message().contains(&id.to_string()));
        assert_eq!(err.code(), ErrorCode::SessionNotFound);
    }

    #[test]
    fn conflict_maps_to_session_full_code() {
        let err = SessionError::conflict("Session is full or unavailable");
        assert_eq!(err.code(), ErrorCode::SessionFull);
        assert_eq!(err.message(), "Session is full or unavailable");
    }

    #[test]
    fn domain_validation_error_converts_with_field() {
        let domain = DomainError::validation("problem", "Problem is required");
        let err: SessionError = domain.into();
        assert!(matches!(
            err,
            SessionError::ValidationFailed { ref field, .. } if field == "problem"
        ));
    }

    #[test]
    fn domain_database_error_converts_to_infrastructure() {
        let domain = DomainError::new(ErrorCode::DatabaseError, "connection reset");
        let err: SessionError = domain.into();
        assert!(matches!(err, SessionError::Infrastructure(_)));
    }
}
