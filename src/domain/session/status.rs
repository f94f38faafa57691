//! SessionStatus enum for the interview session lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an interview session.
///
/// The wire values are `"active"` and `"Completed"`; the asymmetric
/// casing is part of the persisted and client-facing contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SessionStatus {
    #[default]
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "Completed")]
    Completed,
}

impl SessionStatus {
    /// Returns true while the session can still be joined or ended.
    pub fn is_active(&self) -> bool {
        matches!(self, SessionStatus::Active)
    }

    /// Validates a transition from this status to another.
    ///
    /// Valid transitions:
    /// - Active -> Completed
    pub fn can_transition_to(&self, target: &SessionStatus) -> bool {
        use SessionStatus::*;
        matches!((self, target), (Active, Completed))
    }

    /// Returns the storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::Completed => "Completed",
        }
    }

    /// Parses the storage representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(SessionStatus::Active),
            "Completed" => Some(SessionStatus::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
