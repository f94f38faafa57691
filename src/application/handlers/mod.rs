//! Application handlers grouped by domain.

pub mod session;
