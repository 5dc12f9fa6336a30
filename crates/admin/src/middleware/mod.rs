//! HTTP middleware for admin.
//!
//! - `session` - tower-sessions with the `PostgreSQL` store
//! - `auth` - extractors that guard every page except login and health

pub mod auth;
pub mod session;

pub use auth::{AdminAuthRejection, LOGIN_PATH, OptionalAdminAuth, RequireAdminAuth};
pub use session::{SESSION_COOKIE_NAME, create_session_layer, postgres_session_store};
