//! Capture-modal lead endpoint.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use lease_small_space_core::{Email, LeadId, NewLead};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::services::LeadNotice;
use crate::state::AppState;

pub const DEFAULT_SOURCE: &str = "inactivity_popup";
pub const DEFAULT_PAGE: &str = "/";

#[derive(Debug, Default, Deserialize)]
pub struct LeadCaptureRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub page: Option<String>,
    /// RFC 3339 capture time from the browser.
    pub timestamp: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadCaptureResponse {
    pub success: bool,
    pub message: &'static str,
    pub lead_id: LeadId,
}

fn required(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn or_default(value: Option<&String>, default: &str) -> String {
    required(value).unwrap_or_else(|| default.to_owned())
}

impl LeadCaptureRequest {
    /// Validate into a lead row.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` when name, email or phone is missing, the
    /// email is malformed or the timestamp does not parse.
    pub fn into_new_lead(self) -> Result<NewLead> {
        let (Some(name), Some(email), Some(phone)) = (
            required(self.name.as_ref()),
            required(self.email.as_ref()),
            required(self.phone.as_ref()),
        ) else {
            return Err(AppError::BadRequest(
                "Name, email, and phone are required".to_string(),
            ));
        };
        let email = Email::parse(&email)
            .map_err(|e| AppError::BadRequest(format!("Invalid email: {e}")))?;
        let captured_at = required(self.timestamp.as_ref())
            .map(|ts| {
                DateTime::parse_from_rfc3339(&ts)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|_| AppError::BadRequest("Invalid timestamp".to_string()))
            })
            .transpose()?;

        Ok(NewLead {
            name,
            email,
            phone,
            source: or_default(self.source.as_ref(), DEFAULT_SOURCE),
            page_captured: or_default(self.page.as_ref(), DEFAULT_PAGE),
            captured_at,
        })
    }
}

/// Store a lead from the capture modal and queue its notifications.
///
/// # Errors
///
/// Returns 400 for missing or invalid fields and 500 when the lead
/// cannot be stored.
#[instrument(skip(state, request))]
pub async fn capture(
    State(state): State<AppState>,
    Json(request): Json<LeadCaptureRequest>,
) -> Result<Json<LeadCaptureResponse>> {
    let new_lead = request.into_new_lead()?;
    add_breadcrumb("lead", "Capture modal submitted");

    let lead = state.store().create_lead(new_lead).await?;
    info!(lead_id = %lead.id, source = %lead.source, "Lead captured");

    let notifier = state.notifier();
    notifier.lead_captured(LeadNotice {
        lead_id: lead.id,
        name: lead.name.clone(),
        email: lead.email.to_string(),
        phone: lead.phone.clone(),
        source: lead.source.clone(),
        page: lead.page_captured.clone(),
        captured_at: lead.created_at,
        admin_url: notifier.admin_link("/leads"),
    });

    Ok(Json(LeadCaptureResponse {
        success: true,
        message: "Lead captured successfully",
        lead_id: lead.id,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request() -> LeadCaptureRequest {
        LeadCaptureRequest {
            name: Some("Sam".to_string()),
            email: Some("sam@example.com".to_string()),
            phone: Some("720-555-0101".to_string()),
            ..LeadCaptureRequest::default()
        }
    }

    #[test]
    fn test_defaults_applied() {
        let lead = request().into_new_lead().unwrap();
        assert_eq!(lead.source, "inactivity_popup");
        assert_eq!(lead.page_captured, "/");
        assert!(lead.captured_at.is_none());
    }

    #[test]
    fn test_missing_phone_rejected() {
        let result = LeadCaptureRequest {
            phone: Some("   ".to_string()),
            ..request()
        }
        .into_new_lead();
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_timestamp() {
        let lead = LeadCaptureRequest {
            timestamp: Some("2026-10-01T15:30:00Z".to_string()),
            ..request()
        }
        .into_new_lead()
        .unwrap();
        assert_eq!(
            lead.captured_at.unwrap().to_rfc3339(),
            "2026-10-01T15:30:00+00:00"
        );

        let bad = LeadCaptureRequest {
            timestamp: Some("yesterday".to_string()),
            ..request()
        }
        .into_new_lead();
        assert!(matches!(bad, Err(AppError::BadRequest(_))));
    }
}
