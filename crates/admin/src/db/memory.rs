//! In-memory [`AdminStore`] for tests and local runs without Postgres.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use lease_small_space_core::{Inquiry, Lead, QuestionnaireResponse, User};

use super::{AdminStore, Entity, Page, RepositoryError};

/// Rows held newest first.
#[derive(Debug, Clone, Default)]
pub struct MemoryAdminStore {
    leads: Vec<Lead>,
    inquiries: Vec<Inquiry>,
    responses: Vec<QuestionnaireResponse>,
    users: Vec<User>,
}

fn newest_first<T>(mut rows: Vec<T>, created_at: fn(&T) -> DateTime<Utc>) -> Vec<T> {
    rows.sort_by_key(|row| std::cmp::Reverse(created_at(row)));
    rows
}

impl MemoryAdminStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_leads(mut self, leads: Vec<Lead>) -> Self {
        self.leads = newest_first(leads, |l| l.created_at);
        self
    }

    #[must_use]
    pub fn with_inquiries(mut self, inquiries: Vec<Inquiry>) -> Self {
        self.inquiries = newest_first(inquiries, |i| i.created_at);
        self
    }

    #[must_use]
    pub fn with_responses(mut self, responses: Vec<QuestionnaireResponse>) -> Self {
        self.responses = newest_first(responses, |r| r.created_at);
        self
    }

    #[must_use]
    pub fn with_users(mut self, users: Vec<User>) -> Self {
        self.users = newest_first(users, |u| u.created_at);
        self
    }
}

#[async_trait]
impl AdminStore for MemoryAdminStore {
    async fn count(&self, entity: Entity) -> Result<u64, RepositoryError> {
        let len = match entity {
            Entity::Leads => self.leads.len(),
            Entity::Inquiries => self.inquiries.len(),
            Entity::Responses => self.responses.len(),
            Entity::Users => self.users.len(),
        };
        Ok(len as u64)
    }

    async fn count_inquiries_since(&self, since: DateTime<Utc>) -> Result<u64, RepositoryError> {
        Ok(self.inquiries.iter().filter(|i| i.created_at >= since).count() as u64)
    }

    async fn leads(&self, page: Page) -> Result<Vec<Lead>, RepositoryError> {
        Ok(page.slice(&self.leads))
    }

    async fn inquiries(&self, page: Page) -> Result<Vec<Inquiry>, RepositoryError> {
        Ok(page.slice(&self.inquiries))
    }

    async fn responses(&self, page: Page) -> Result<Vec<QuestionnaireResponse>, RepositoryError> {
        Ok(page.slice(&self.responses))
    }

    async fn users(&self, page: Page) -> Result<Vec<User>, RepositoryError> {
        Ok(page.slice(&self.users))
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
