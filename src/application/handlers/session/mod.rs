//! Session lifecycle handlers.
//!
//! One handler per operation, each holding `Arc<dyn Port>` handles
//! injected at startup. The handlers own the lifecycle guard logic;
//! HTTP adapters only translate errors to status codes.

mod create_session;
mod end_session;
mod get_session;
mod join_session;
mod list_active_sessions;
mod list_my_recent_sessions;

pub use create_session::{CreateSessionCommand, CreateSessionHandler};
pub use end_session::{EndSessionCommand, EndSessionHandler};
pub use get_session::{GetSessionHandler, GetSessionQuery};
pub use join_session::{JoinSessionCommand, JoinSessionHandler};
pub use list_active_sessions::ListActiveSessionsHandler;
pub use list_my_recent_sessions::{ListMyRecentSessionsHandler, ListMyRecentSessionsQuery};

/// Cap on list query results. No pagination beyond this.
pub const SESSION_LIST_LIMIT: u32 = 20;
