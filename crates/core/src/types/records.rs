//! Persisted records and the inputs that create them.
//!
//! The `New*` structs carry exactly what a caller supplies; ids and
//! timestamps are assigned by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Email, InquiryId, InquiryStatus, InquiryType, LeadId, LeadStatus, ResponseId, UserId};
use crate::questionnaire::SizeRange;

/// A prospective tenant or buyer, unique by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One contact event from a user. A user accumulates one per submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Inquiry {
    pub id: InquiryId,
    pub user_id: UserId,
    pub full_name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub inquiry_type: InquiryType,
    pub status: InquiryStatus,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The structured answers captured by a completed questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct QuestionnaireResponse {
    pub id: ResponseId,
    pub user_id: UserId,
    pub inquiry_id: InquiryId,
    pub lease_or_buy: String,
    pub space_type: String,
    pub size_min: i32,
    pub size_max: i32,
    pub location_preference: String,
    pub timeline: String,
    pub budget_min: Option<i32>,
    pub budget_max: Option<i32>,
    pub features: Vec<String>,
    /// Raw answer set exactly as submitted.
    pub responses: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// A visitor who left contact details through the capture modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Lead {
    pub id: LeadId,
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub source: String,
    pub page_captured: String,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
}

/// Upsert input for [`User`]. Existing rows with the same email are overwritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: Email,
    pub full_name: String,
    pub phone: Option<String>,
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInquiry {
    pub user_id: UserId,
    pub full_name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub inquiry_type: InquiryType,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewQuestionnaireResponse {
    pub user_id: UserId,
    pub inquiry_id: InquiryId,
    pub lease_or_buy: String,
    pub space_type: String,
    pub size_range: SizeRange,
    pub location_preference: String,
    pub timeline: String,
    pub responses: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLead {
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub source: String,
    pub page_captured: String,
    /// Client-reported capture time; the store uses "now" when absent.
    pub captured_at: Option<DateTime<Utc>>,
}
