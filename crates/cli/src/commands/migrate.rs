//! Database migration command.
//!
//! Applies `crates/site/migrations/` and creates the session tables used
//! by the site (`lss.site_session`) and the admin (`lss.admin_session`).

use super::{CliError, connect};

/// Run all migrations.
pub async fn run() -> Result<(), CliError> {
    let pool = connect().await?;

    tracing::info!("Running schema migrations...");
    sqlx::migrate!("../site/migrations").run(&pool).await?;

    tracing::info!("Creating session tables...");
    lease_small_space_site::middleware::postgres_session_store(&pool)
        .map_err(CliError::SessionStore)?
        .migrate()
        .await?;
    lease_small_space_admin::middleware::postgres_session_store(&pool)
        .map_err(CliError::SessionStore)?
        .migrate()
        .await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
