//! Ports - async trait contracts between the application core and adapters.

mod comms_provider;
mod session_reader;
mod session_repository;
mod token_verifier;

pub use comms_provider::{CallMetadata, CommsError, CommsProvider};
pub use session_reader::{SessionReader, SessionSummary, SessionView, UserProfile};
pub use session_repository::SessionRepository;
pub use token_verifier::TokenVerifier;
