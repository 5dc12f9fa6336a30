//! Lead repository.

use sqlx::PgPool;

use lease_small_space_core::{Lead, LeadStatus, NewLead};

use super::RepositoryError;

pub struct LeadRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LeadRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a lead with status `new`, timestamped with the client's
    /// capture time when one was given.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, lead: &NewLead) -> Result<Lead, RepositoryError> {
        let row = sqlx::query_as::<_, Lead>(
            r"
            INSERT INTO lss.lead (name, email, phone, source, page_captured, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, now()))
            RETURNING id, name, email, phone, source, page_captured, status, created_at
            ",
        )
        .bind(&lead.name)
        .bind(lead.email.as_str())
        .bind(&lead.phone)
        .bind(&lead.source)
        .bind(&lead.page_captured)
        .bind(LeadStatus::New)
        .bind(lead.captured_at)
        .fetch_one(self.pool)
        .await?;

        Ok(row)
    }
}
