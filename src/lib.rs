//! Pairview - backend for peer-matched mock interview sessions.
//!
//! Hosts create a session around a coding problem, one other user may
//! join as participant, and the host ends it. Real-time video and chat
//! are delegated to an external communications provider correlated by
//! a per-session call id.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
