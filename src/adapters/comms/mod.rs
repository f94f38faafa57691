//! Communications provider adapters.

mod mock;
mod stream;

pub use mock::MockCommsProvider;
pub use stream::{StreamComms, StreamCommsConfig};
