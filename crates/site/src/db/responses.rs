//! Questionnaire response repository.

use sqlx::PgPool;

use lease_small_space_core::{NewQuestionnaireResponse, QuestionnaireResponse};

use super::{RepositoryError, sqft_column};

pub struct ResponseRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ResponseRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store a completed questionnaire. Budget is left unset and features empty.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the size does not fit a column
    /// or the parent rows are missing.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        response: &NewQuestionnaireResponse,
    ) -> Result<QuestionnaireResponse, RepositoryError> {
        let size_min = sqft_column(response.size_range.min)?;
        let size_max = sqft_column(response.size_range.max)?;

        sqlx::query_as::<_, QuestionnaireResponse>(
            r"
            INSERT INTO lss.questionnaire_response
                (user_id, inquiry_id, lease_or_buy, space_type, size_min, size_max,
                 location_preference, timeline, responses)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, user_id, inquiry_id, lease_or_buy, space_type, size_min, size_max,
                      location_preference, timeline, budget_min, budget_max, features,
                      responses, created_at
            ",
        )
        .bind(response.user_id)
        .bind(response.inquiry_id)
        .bind(&response.lease_or_buy)
        .bind(&response.space_type)
        .bind(size_min)
        .bind(size_max)
        .bind(&response.location_preference)
        .bind(&response.timeline)
        .bind(&response.responses)
        .fetch_one(self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                RepositoryError::Conflict(format!(
                    "unknown user {} or inquiry {}",
                    response.user_id, response.inquiry_id
                ))
            }
            other => RepositoryError::Database(other),
        })
    }
}
