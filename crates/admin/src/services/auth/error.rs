//! Admin authentication error types.

use thiserror::Error;

/// Errors that can occur while logging in or out.
#[derive(Debug, Error)]
pub enum AdminAuthError {
    /// The submitted token does not match `ADMIN_ACCESS_TOKEN`.
    #[error("invalid access token")]
    InvalidToken,

    /// The session could not be read or written.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}
