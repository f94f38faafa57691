//! Session domain module.
//!
//! An interview session pairs a host with at most one participant
//! around a coding problem. The only transitions are the one-shot
//! participant claim and the host-driven `Active -> Completed` move.

mod aggregate;
mod errors;
mod status;

pub use aggregate::Session;
pub use errors::SessionError;
pub use status::SessionStatus;
