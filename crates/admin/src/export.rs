//! CSV export of the admin listings.
//!
//! One header row of fixed column names per entity, then one row per
//! record. Fields are quoted only when they contain a comma, a quote or
//! a line break. Missing values are empty and JSON columns are written
//! inline.

use std::string::FromUtf8Error;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use thiserror::Error;

use lease_small_space_core::{Inquiry, Lead, QuestionnaireResponse, User};

use crate::db::{AdminStore, Entity, Page, RepositoryError};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("store error: {0}")]
    Store(#[from] RepositoryError),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv output is not UTF-8: {0}")]
    Encoding(#[from] FromUtf8Error),
}

/// A record that can be written as one CSV row.
pub trait CsvRow {
    const HEADERS: &'static [&'static str];

    /// Field values in [`Self::HEADERS`] order.
    ///
    /// # Errors
    ///
    /// Returns an error if a JSON column cannot be serialized.
    fn fields(&self) -> Result<Vec<String>, ExportError>;
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn optional<T: ToString>(value: Option<&T>) -> String {
    value.map(ToString::to_string).unwrap_or_default()
}

fn json(value: &serde_json::Value) -> Result<String, ExportError> {
    if value.is_null() {
        return Ok(String::new());
    }
    Ok(serde_json::to_string(value)?)
}

impl CsvRow for Lead {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "name",
        "email",
        "phone",
        "source",
        "page_captured",
        "status",
        "created_at",
    ];

    fn fields(&self) -> Result<Vec<String>, ExportError> {
        Ok(vec![
            self.id.to_string(),
            self.name.clone(),
            self.email.to_string(),
            self.phone.clone(),
            self.source.clone(),
            self.page_captured.clone(),
            self.status.as_str().to_owned(),
            timestamp(self.created_at),
        ])
    }
}

impl CsvRow for Inquiry {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "user_id",
        "full_name",
        "email",
        "phone",
        "inquiry_type",
        "status",
        "message",
        "created_at",
    ];

    fn fields(&self) -> Result<Vec<String>, ExportError> {
        Ok(vec![
            self.id.to_string(),
            self.user_id.to_string(),
            self.full_name.clone(),
            self.email.to_string(),
            optional(self.phone.as_ref()),
            self.inquiry_type.as_str().to_owned(),
            self.status.as_str().to_owned(),
            optional(self.message.as_ref()),
            timestamp(self.created_at),
        ])
    }
}

impl CsvRow for QuestionnaireResponse {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "user_id",
        "inquiry_id",
        "lease_or_buy",
        "space_type",
        "size_min",
        "size_max",
        "location_preference",
        "timeline",
        "budget_min",
        "budget_max",
        "features",
        "responses",
        "created_at",
    ];

    fn fields(&self) -> Result<Vec<String>, ExportError> {
        Ok(vec![
            self.id.to_string(),
            self.user_id.to_string(),
            self.inquiry_id.to_string(),
            self.lease_or_buy.clone(),
            self.space_type.clone(),
            self.size_min.to_string(),
            self.size_max.to_string(),
            self.location_preference.clone(),
            self.timeline.clone(),
            optional(self.budget_min.as_ref()),
            optional(self.budget_max.as_ref()),
            serde_json::to_string(&self.features)?,
            json(&self.responses)?,
            timestamp(self.created_at),
        ])
    }
}

impl CsvRow for User {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "email",
        "full_name",
        "phone",
        "company_name",
        "created_at",
        "updated_at",
    ];

    fn fields(&self) -> Result<Vec<String>, ExportError> {
        Ok(vec![
            self.id.to_string(),
            self.email.to_string(),
            optional(self.full_name.as_ref()),
            optional(self.phone.as_ref()),
            optional(self.company_name.as_ref()),
            timestamp(self.created_at),
            timestamp(self.updated_at),
        ])
    }
}

/// Serialize `rows` as CSV. An empty slice produces no file.
///
/// # Errors
///
/// Returns an error if a row cannot be serialized or written.
pub fn export_csv<T: CsvRow>(rows: &[T]) -> Result<Option<String>, ExportError> {
    if rows.is_empty() {
        return Ok(None);
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(T::HEADERS)?;
    for row in rows {
        writer.write_record(row.fields()?)?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(Some(String::from_utf8(bytes)?))
}

/// Export one listing page of `entity`, exactly as the admin shows it.
///
/// # Errors
///
/// Returns an error if the store query or serialization fails.
pub async fn export_page(
    store: &dyn AdminStore,
    entity: Entity,
    page: Page,
) -> Result<Option<String>, ExportError> {
    match entity {
        Entity::Leads => export_csv(&store.leads(page).await?),
        Entity::Inquiries => export_csv(&store.inquiries(page).await?),
        Entity::Responses => export_csv(&store.responses(page).await?),
        Entity::Users => export_csv(&store.users(page).await?),
    }
}

/// Download name, e.g. `leads-2026-10-16.csv` or `leads-page-2-2026-10-16.csv`.
#[must_use]
pub fn file_name(entity: Entity, page: Page, date: NaiveDate) -> String {
    let date = date.format("%Y-%m-%d");
    if page.number() > 1 {
        format!("{}-page-{}-{date}.csv", entity.slug(), page.number())
    } else {
        format!("{}-{date}.csv", entity.slug())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use lease_small_space_core::{
        Email, InquiryId, LeadId, LeadStatus, ResponseId, UserId,
    };

    use super::*;
    use crate::db::MemoryAdminStore;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 1, hour, 0, 0).unwrap()
    }

    fn lead(name: &str) -> Lead {
        Lead {
            id: LeadId::new_v4(),
            name: name.to_owned(),
            email: Email::parse("pat@example.com").unwrap(),
            phone: "303-555-0100".to_owned(),
            source: "inactivity_popup".to_owned(),
            page_captured: "/results".to_owned(),
            status: LeadStatus::New,
            created_at: at(9),
        }
    }

    fn user(company: Option<&str>) -> User {
        User {
            id: UserId::new_v4(),
            email: Email::parse("jo@acme.co").unwrap(),
            full_name: Some("Jo Acme".to_owned()),
            phone: None,
            company_name: company.map(str::to_owned),
            created_at: at(8),
            updated_at: at(10),
        }
    }

    #[test]
    fn test_empty_is_no_file() {
        assert!(export_csv::<Lead>(&[]).unwrap().is_none());
    }

    #[test]
    fn test_header_and_row() {
        let lead = lead("Pat Doe");
        let csv = export_csv(std::slice::from_ref(&lead)).unwrap().unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("id,name,email,phone,source,page_captured,status,created_at")
        );
        assert_eq!(
            lines.next().unwrap(),
            format!(
                "{},Pat Doe,pat@example.com,303-555-0100,inactivity_popup,/results,new,2026-10-01T09:00:00.000Z",
                lead.id
            )
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_quoting() {
        let csv = export_csv(&[lead("Doe, Pat \"PD\"")]).unwrap().unwrap();
        assert!(csv.contains(",\"Doe, Pat \"\"PD\"\"\",pat@example.com,"));

        let csv = export_csv(&[lead("Line\nBreak")]).unwrap().unwrap();
        assert!(csv.contains(",\"Line\nBreak\","));
    }

    #[test]
    fn test_missing_values_are_empty() {
        let user = user(None);
        let csv = export_csv(&[user.clone()]).unwrap().unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(
            row,
            format!(
                "{},jo@acme.co,Jo Acme,,,2026-10-01T08:00:00.000Z,2026-10-01T10:00:00.000Z",
                user.id
            )
        );
    }

    #[test]
    fn test_json_columns_inline() {
        let response = QuestionnaireResponse {
            id: ResponseId::new_v4(),
            user_id: UserId::new_v4(),
            inquiry_id: InquiryId::new_v4(),
            lease_or_buy: "lease".to_owned(),
            space_type: "warehouse".to_owned(),
            size_min: 1500,
            size_max: 3000,
            location_preference: "denver".to_owned(),
            timeline: "asap".to_owned(),
            budget_min: None,
            budget_max: None,
            features: Vec::new(),
            responses: json!({"size": 2000}),
            created_at: at(9),
        };
        let csv = export_csv(&[response]).unwrap().unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains(",lease,warehouse,1500,3000,denver,asap,,,[],\"{\"\"size\"\":2000}\","));
    }

    #[test]
    fn test_file_name() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(file_name(Entity::Leads, Page::new(1), date), "leads-2026-10-16.csv");
        assert_eq!(
            file_name(Entity::Responses, Page::new(2), date),
            "responses-page-2-2026-10-16.csv"
        );
    }

    #[tokio::test]
    async fn test_export_page_uses_listing_page() {
        let leads: Vec<Lead> = (0..30).map(|i| lead(&format!("Lead {i}"))).collect();
        let store = MemoryAdminStore::new().with_leads(leads);

        let first = export_page(&store, Entity::Leads, Page::new(1)).await.unwrap().unwrap();
        let second = export_page(&store, Entity::Leads, Page::new(2)).await.unwrap().unwrap();
        assert_eq!(first.lines().count(), 26);
        assert_eq!(second.lines().count(), 6);
        assert!(
            export_page(&store, Entity::Users, Page::new(1))
                .await
                .unwrap()
                .is_none()
        );
    }
}
