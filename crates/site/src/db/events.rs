//! Analytics event log.

use sqlx::PgPool;

use lease_small_space_core::analytics::AnalyticsEvent;

use super::RepositoryError;

pub struct EventRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EventRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Append one event.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn append(&self, event: &AnalyticsEvent) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO lss.analytics_event
                (event_name, event_properties, user_id, session_id, page_url, user_agent)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(event.event_name.as_str())
        .bind(&event.event_properties)
        .bind(event.user_id)
        .bind(event.session_id.as_deref())
        .bind(event.page_url.as_deref())
        .bind(event.user_agent.as_deref())
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
