//! The store seam used by handlers and services.

use async_trait::async_trait;
use sqlx::PgPool;

use lease_small_space_core::analytics::AnalyticsEvent;
use lease_small_space_core::{
    Inquiry, Lead, NewInquiry, NewLead, NewQuestionnaireResponse, NewUser, QuestionnaireResponse,
    User,
};

use super::{
    EventRepository, InquiryRepository, LeadRepository, RepositoryError, ResponseRepository,
    UserRepository,
};

/// Persistence operations needed by the public site.
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Insert or overwrite a user keyed by email.
    async fn upsert_user(&self, user: NewUser) -> Result<User, RepositoryError>;

    async fn create_inquiry(&self, inquiry: NewInquiry) -> Result<Inquiry, RepositoryError>;

    async fn create_response(
        &self,
        response: NewQuestionnaireResponse,
    ) -> Result<QuestionnaireResponse, RepositoryError>;

    async fn create_lead(&self, lead: NewLead) -> Result<Lead, RepositoryError>;

    async fn record_event(&self, event: AnalyticsEvent) -> Result<(), RepositoryError>;

    /// Cheap connectivity check for readiness probes.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// [`LeadStore`] backed by `PostgreSQL`.
#[derive(Clone)]
pub struct PgLeadStore {
    pool: PgPool,
}

impl PgLeadStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl LeadStore for PgLeadStore {
    async fn upsert_user(&self, user: NewUser) -> Result<User, RepositoryError> {
        UserRepository::new(&self.pool).upsert(&user).await
    }

    async fn create_inquiry(&self, inquiry: NewInquiry) -> Result<Inquiry, RepositoryError> {
        InquiryRepository::new(&self.pool).create(&inquiry).await
    }

    async fn create_response(
        &self,
        response: NewQuestionnaireResponse,
    ) -> Result<QuestionnaireResponse, RepositoryError> {
        ResponseRepository::new(&self.pool).create(&response).await
    }

    async fn create_lead(&self, lead: NewLead) -> Result<Lead, RepositoryError> {
        LeadRepository::new(&self.pool).create(&lead).await
    }

    async fn record_event(&self, event: AnalyticsEvent) -> Result<(), RepositoryError> {
        EventRepository::new(&self.pool).append(&event).await
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
