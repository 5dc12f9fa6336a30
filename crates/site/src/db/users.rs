//! User repository.

use sqlx::PgPool;

use lease_small_space_core::{NewUser, User};

use super::RepositoryError;

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a user, or overwrite the contact details of the user with
    /// the same email. The id and `created_at` of an existing row survive.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, User>(
            r"
            INSERT INTO lss.user (email, full_name, phone, company_name)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO UPDATE
            SET full_name = EXCLUDED.full_name,
                phone = EXCLUDED.phone,
                company_name = EXCLUDED.company_name,
                updated_at = now()
            RETURNING id, email, full_name, phone, company_name, created_at, updated_at
            ",
        )
        .bind(user.email.as_str())
        .bind(&user.full_name)
        .bind(user.phone.as_deref())
        .bind(user.company_name.as_deref())
        .fetch_one(self.pool)
        .await?;

        Ok(row)
    }
}
