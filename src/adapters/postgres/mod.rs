//! PostgreSQL adapters.

mod session_reader;
mod session_repository;

pub use session_reader::PostgresSessionReader;
pub use session_repository::PostgresSessionRepository;
