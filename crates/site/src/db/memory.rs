//! In-memory [`LeadStore`] for tests and local runs without Postgres.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use lease_small_space_core::analytics::AnalyticsEvent;
use lease_small_space_core::{
    Inquiry, InquiryId, InquiryStatus, Lead, LeadId, LeadStatus, NewInquiry, NewLead,
    NewQuestionnaireResponse, NewUser, QuestionnaireResponse, ResponseId, User, UserId,
};

use super::{LeadStore, RepositoryError, sqft_column};

/// Store operation that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    UpsertUser,
    CreateInquiry,
    CreateResponse,
    CreateLead,
}

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    inquiries: Vec<Inquiry>,
    responses: Vec<QuestionnaireResponse>,
    leads: Vec<Lead>,
    events: Vec<AnalyticsEvent>,
}

#[derive(Debug, Default)]
pub struct MemoryLeadStore {
    tables: Mutex<Tables>,
    fail_at: Mutex<Option<FailPoint>>,
}

impl MemoryLeadStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose `point` operation always fails.
    #[must_use]
    pub fn failing_at(point: FailPoint) -> Self {
        Self {
            fail_at: Mutex::new(Some(point)),
            ..Self::default()
        }
    }

    /// Change or clear the failing operation.
    pub async fn set_fail_point(&self, point: Option<FailPoint>) {
        *self.fail_at.lock().await = point;
    }

    async fn check(&self, point: FailPoint) -> Result<(), RepositoryError> {
        if *self.fail_at.lock().await == Some(point) {
            return Err(RepositoryError::Unavailable(format!("{point:?} disabled")));
        }
        Ok(())
    }

    pub async fn users(&self) -> Vec<User> {
        self.tables.lock().await.users.clone()
    }

    pub async fn inquiries(&self) -> Vec<Inquiry> {
        self.tables.lock().await.inquiries.clone()
    }

    pub async fn responses(&self) -> Vec<QuestionnaireResponse> {
        self.tables.lock().await.responses.clone()
    }

    pub async fn leads(&self) -> Vec<Lead> {
        self.tables.lock().await.leads.clone()
    }

    pub async fn events(&self) -> Vec<AnalyticsEvent> {
        self.tables.lock().await.events.clone()
    }
}

#[async_trait]
impl LeadStore for MemoryLeadStore {
    async fn upsert_user(&self, user: NewUser) -> Result<User, RepositoryError> {
        self.check(FailPoint::UpsertUser).await?;
        let now = Utc::now();
        let mut tables = self.tables.lock().await;

        if let Some(existing) = tables.users.iter_mut().find(|u| u.email == user.email) {
            existing.full_name = Some(user.full_name);
            existing.phone = user.phone;
            existing.company_name = user.company_name;
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        let created = User {
            id: UserId::new_v4(),
            email: user.email,
            full_name: Some(user.full_name),
            phone: user.phone,
            company_name: user.company_name,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn create_inquiry(&self, inquiry: NewInquiry) -> Result<Inquiry, RepositoryError> {
        self.check(FailPoint::CreateInquiry).await?;
        let mut tables = self.tables.lock().await;
        if !tables.users.iter().any(|u| u.id == inquiry.user_id) {
            return Err(RepositoryError::Conflict(format!(
                "unknown user {}",
                inquiry.user_id
            )));
        }

        let created = Inquiry {
            id: InquiryId::new_v4(),
            user_id: inquiry.user_id,
            full_name: inquiry.full_name,
            email: inquiry.email,
            phone: inquiry.phone,
            inquiry_type: inquiry.inquiry_type,
            status: InquiryStatus::New,
            message: inquiry.message,
            created_at: Utc::now(),
        };
        tables.inquiries.push(created.clone());
        Ok(created)
    }

    async fn create_response(
        &self,
        response: NewQuestionnaireResponse,
    ) -> Result<QuestionnaireResponse, RepositoryError> {
        self.check(FailPoint::CreateResponse).await?;
        let size_min = sqft_column(response.size_range.min)?;
        let size_max = sqft_column(response.size_range.max)?;
        let mut tables = self.tables.lock().await;
        if !tables.inquiries.iter().any(|i| i.id == response.inquiry_id) {
            return Err(RepositoryError::Conflict(format!(
                "unknown inquiry {}",
                response.inquiry_id
            )));
        }

        let created = QuestionnaireResponse {
            id: ResponseId::new_v4(),
            user_id: response.user_id,
            inquiry_id: response.inquiry_id,
            lease_or_buy: response.lease_or_buy,
            space_type: response.space_type,
            size_min,
            size_max,
            location_preference: response.location_preference,
            timeline: response.timeline,
            budget_min: None,
            budget_max: None,
            features: Vec::new(),
            responses: response.responses,
            created_at: Utc::now(),
        };
        tables.responses.push(created.clone());
        Ok(created)
    }

    async fn create_lead(&self, lead: NewLead) -> Result<Lead, RepositoryError> {
        self.check(FailPoint::CreateLead).await?;
        let created = Lead {
            id: LeadId::new_v4(),
            name: lead.name,
            email: lead.email,
            phone: lead.phone,
            source: lead.source,
            page_captured: lead.page_captured,
            status: LeadStatus::New,
            created_at: lead.captured_at.unwrap_or_else(Utc::now),
        };
        self.tables.lock().await.leads.push(created.clone());
        Ok(created)
    }

    async fn record_event(&self, event: AnalyticsEvent) -> Result<(), RepositoryError> {
        self.tables.lock().await.events.push(event);
        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lease_small_space_core::{Email, InquiryType};

    use super::*;

    fn new_user(email: &str, name: &str) -> NewUser {
        NewUser {
            email: Email::parse(email).unwrap(),
            full_name: name.to_owned(),
            phone: Some("303-555-0100".to_owned()),
            company_name: None,
        }
    }

    #[tokio::test]
    async fn test_upsert_is_keyed_on_email() {
        let store = MemoryLeadStore::new();
        let first = store.upsert_user(new_user("a@b.co", "First")).await.unwrap();
        let second = store.upsert_user(new_user("a@b.co", "Second")).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.full_name.as_deref(), Some("Second"));
        assert_eq!(store.users().await.len(), 1);
    }

    #[tokio::test]
    async fn test_inquiry_requires_user() {
        let store = MemoryLeadStore::new();
        let result = store
            .create_inquiry(NewInquiry {
                user_id: UserId::new_v4(),
                full_name: "Nobody".to_owned(),
                email: Email::parse("n@b.co").unwrap(),
                phone: None,
                inquiry_type: InquiryType::Contact,
                message: None,
            })
            .await;
        assert!(matches!(result, Err(RepositoryError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_fail_point() {
        let store = MemoryLeadStore::failing_at(FailPoint::UpsertUser);
        assert!(matches!(
            store.upsert_user(new_user("a@b.co", "A")).await,
            Err(RepositoryError::Unavailable(_))
        ));
        store.set_fail_point(None).await;
        assert!(store.upsert_user(new_user("a@b.co", "A")).await.is_ok());
    }
}
