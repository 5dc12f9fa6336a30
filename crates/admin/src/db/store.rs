//! The read seam used by admin routes and the CLI export.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use lease_small_space_core::{Inquiry, Lead, QuestionnaireResponse, User};

use super::{Entity, Page, RepositoryError};

/// Read operations behind the admin pages.
#[async_trait]
pub trait AdminStore: Send + Sync {
    async fn count(&self, entity: Entity) -> Result<u64, RepositoryError>;

    /// Inquiries created at or after `since`.
    async fn count_inquiries_since(&self, since: DateTime<Utc>) -> Result<u64, RepositoryError>;

    async fn leads(&self, page: Page) -> Result<Vec<Lead>, RepositoryError>;

    async fn inquiries(&self, page: Page) -> Result<Vec<Inquiry>, RepositoryError>;

    async fn responses(&self, page: Page) -> Result<Vec<QuestionnaireResponse>, RepositoryError>;

    async fn users(&self, page: Page) -> Result<Vec<User>, RepositoryError>;

    /// Cheap connectivity check for readiness probes.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// [`AdminStore`] backed by `PostgreSQL`.
#[derive(Clone)]
pub struct PgAdminStore {
    pool: PgPool,
}

impl PgAdminStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn limit_offset(page: Page) -> Result<(i64, i64), RepositoryError> {
    let offset = i64::try_from(page.offset())
        .map_err(|_| RepositoryError::DataCorruption(format!("page {} out of range", page.number())))?;
    Ok((i64::from(page.size()), offset))
}

fn to_count(value: i64) -> Result<u64, RepositoryError> {
    u64::try_from(value).map_err(|_| RepositoryError::DataCorruption(format!("negative count {value}")))
}

#[async_trait]
impl AdminStore for PgAdminStore {
    async fn count(&self, entity: Entity) -> Result<u64, RepositoryError> {
        let sql = format!("SELECT COUNT(*) FROM {}", entity.table());
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        to_count(count)
    }

    async fn count_inquiries_since(&self, since: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM lss.inquiry WHERE created_at >= $1")
                .bind(since)
                .fetch_one(&self.pool)
                .await?;
        to_count(count)
    }

    async fn leads(&self, page: Page) -> Result<Vec<Lead>, RepositoryError> {
        let (limit, offset) = limit_offset(page)?;
        let rows = sqlx::query_as::<_, Lead>(
            r"
            SELECT id, name, email, phone, source, page_captured, status, created_at
            FROM lss.lead
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn inquiries(&self, page: Page) -> Result<Vec<Inquiry>, RepositoryError> {
        let (limit, offset) = limit_offset(page)?;
        let rows = sqlx::query_as::<_, Inquiry>(
            r"
            SELECT id, user_id, full_name, email, phone, inquiry_type, status, message, created_at
            FROM lss.inquiry
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn responses(&self, page: Page) -> Result<Vec<QuestionnaireResponse>, RepositoryError> {
        let (limit, offset) = limit_offset(page)?;
        let rows = sqlx::query_as::<_, QuestionnaireResponse>(
            r"
            SELECT id, user_id, inquiry_id, lease_or_buy, space_type, size_min, size_max,
                   location_preference, timeline, budget_min, budget_max, features,
                   responses, created_at
            FROM lss.questionnaire_response
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn users(&self, page: Page) -> Result<Vec<User>, RepositoryError> {
        let (limit, offset) = limit_offset(page)?;
        let rows = sqlx::query_as::<_, User>(
            r"
            SELECT id, email, full_name, phone, company_name, created_at, updated_at
            FROM lss.user
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
