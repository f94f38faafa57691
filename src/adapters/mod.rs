//! Adapters - infrastructure implementations of the ports.

pub mod auth;
pub mod comms;
pub mod http;
pub mod postgres;
