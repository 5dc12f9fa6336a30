//! One-shot questionnaire submission for JavaScript clients.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use lease_small_space_core::analytics::TrackedEvent;
use lease_small_space_core::questionnaire::{Answers, DEFAULT_SIZE_SQFT};
use lease_small_space_core::{InquiryId, UserId};

use crate::error::{AppError, Result};
use crate::middleware::Visitor;
use crate::services::{Submission, SubmissionError};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company_name: Option<String>,
}

/// Size as sent by forms (string) or scripts (number).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SizeValue {
    Number(u32),
    Text(String),
}

impl SizeValue {
    fn sqft(&self) -> u32 {
        match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().replace(',', "").parse().unwrap_or(0),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    #[serde(default)]
    pub lease_or_buy: String,
    #[serde(default)]
    pub space_type: String,
    pub size: Option<SizeValue>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub timeline: String,
    pub sms_consent: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SubmitRequest {
    pub user: Option<SubmitUser>,
    pub response: Option<SubmitResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReply {
    pub success: bool,
    pub user_id: UserId,
    pub inquiry_id: InquiryId,
    pub results_url: String,
}

impl SubmitRequest {
    /// Flatten into a submission. Missing name or email is rejected here,
    /// before anything is written.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` when the user block, name or email is missing.
    pub fn into_submission(self) -> Result<Submission> {
        let user = self.user.unwrap_or_default();
        let blank = |v: &Option<String>| v.as_deref().is_none_or(|s| s.trim().is_empty());
        if blank(&user.email) || blank(&user.name) {
            return Err(AppError::BadRequest("Email and name are required".to_string()));
        }
        let response = self.response.unwrap_or_default();

        Ok(Submission {
            answers: Answers {
                lease_or_buy: response.lease_or_buy,
                space_type: response.space_type,
                size: response
                    .size
                    .as_ref()
                    .map_or(DEFAULT_SIZE_SQFT, SizeValue::sqft),
                location: response.location,
                timeline: response.timeline,
                name: user.name.unwrap_or_default(),
                email: user.email.unwrap_or_default(),
                phone: user.phone.unwrap_or_default(),
                sms_consent: response.sms_consent.unwrap_or(true),
            },
            company_name: user.company_name,
        })
    }
}

/// Store a complete questionnaire in one request.
///
/// # Errors
///
/// Returns 400 when name or email is missing (nothing is stored) and 500
/// when a write fails.
#[instrument(skip(state, visitor, request))]
pub async fn submit(
    State(state): State<AppState>,
    mut visitor: Visitor,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<SubmitReply>> {
    let submission = request.into_submission()?;
    let analytics = state.analytics();
    analytics.track(TrackedEvent::completed(&submission.answers), &visitor.context);

    let outcome = match state.pipeline().submit(submission).await {
        Ok(outcome) => outcome,
        Err(e) => {
            let reason = match &e {
                SubmissionError::Validation(message) => message.as_str(),
                SubmissionError::Store { .. } => "storage failed",
            };
            analytics.track(TrackedEvent::submission_error(reason), &visitor.context);
            return Err(e.into());
        }
    };

    visitor.identify(outcome.user.id).await;
    analytics.track(
        TrackedEvent::lead_generated(outcome.user.id, outcome.inquiry.id),
        &visitor.context,
    );

    Ok(Json(SubmitReply {
        success: true,
        user_id: outcome.user.id,
        inquiry_id: outcome.inquiry.id,
        results_url: outcome.results.to_path(),
    }))
}
