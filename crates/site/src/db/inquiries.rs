//! Inquiry repository.

use sqlx::PgPool;

use lease_small_space_core::{Inquiry, InquiryStatus, NewInquiry};

use super::RepositoryError;

pub struct InquiryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> InquiryRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Append an inquiry with status `new`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the user does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, inquiry: &NewInquiry) -> Result<Inquiry, RepositoryError> {
        sqlx::query_as::<_, Inquiry>(
            r"
            INSERT INTO lss.inquiry (user_id, full_name, email, phone, inquiry_type, status, message)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, full_name, email, phone, inquiry_type, status, message, created_at
            ",
        )
        .bind(inquiry.user_id)
        .bind(&inquiry.full_name)
        .bind(inquiry.email.as_str())
        .bind(inquiry.phone.as_deref())
        .bind(inquiry.inquiry_type)
        .bind(InquiryStatus::New)
        .bind(inquiry.message.as_deref())
        .fetch_one(self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                RepositoryError::Conflict(format!("unknown user {}", inquiry.user_id))
            }
            other => RepositoryError::Database(other),
        })
    }
}
