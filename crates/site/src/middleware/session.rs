//! Session middleware configuration.
//!
//! Sessions hold the questionnaire draft, the visitor id used for
//! analytics and whether the capture modal has been shown.

use sqlx::PgPool;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};
use tower_sessions_sqlx_store::PostgresStore;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "lss_session";

/// Session expiry time in seconds (30 days). Drafts live as long as the
/// session does.
const SESSION_EXPIRY_SECONDS: i64 = 30 * 24 * 60 * 60;

/// The Postgres session store in `lss.site_session`.
///
/// # Errors
///
/// Returns error if the schema or table name is rejected.
pub fn postgres_session_store(pool: &PgPool) -> Result<PostgresStore, String> {
    PostgresStore::new(pool.clone())
        .with_schema_name("lss")?
        .with_table_name("site_session")
}

/// Create the session layer over any store.
#[must_use]
pub fn create_session_layer<S: SessionStore + Clone>(
    store: S,
    secure: bool,
) -> SessionManagerLayer<S> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
