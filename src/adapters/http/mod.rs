//! HTTP adapters - REST API implementations.

pub mod middleware;
pub mod session;

pub use session::{session_routes, SessionHandlers};
