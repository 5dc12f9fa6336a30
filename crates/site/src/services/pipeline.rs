//! Questionnaire submission: user upsert, inquiry, response, notices.
//!
//! Rows are written in order without a surrounding transaction. When a
//! later write fails the earlier rows stay; the error log carries the
//! ids already created.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, instrument};

use lease_small_space_core::questionnaire::{Answers, MAX_SIZE_SQFT, ResultsQuery};
use lease_small_space_core::{
    Email, Inquiry, InquiryType, NewInquiry, NewQuestionnaireResponse, NewUser,
    QuestionnaireResponse, User,
};

use super::notify::{Notifier, QuestionnaireNotice};
use crate::db::{LeadStore, RepositoryError};

/// Which write failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    User,
    Inquiry,
    Response,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::User => "user",
            Self::Inquiry => "inquiry",
            Self::Response => "questionnaire_response",
        })
    }
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The answers cannot be stored as given.
    #[error("{0}")]
    Validation(String),

    #[error("failed to store {stage}: {source}")]
    Store {
        stage: Stage,
        #[source]
        source: RepositoryError,
    },
}

/// A completed questionnaire ready to store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub answers: Answers,
    pub company_name: Option<String>,
}

impl Submission {
    #[must_use]
    pub const fn new(answers: Answers) -> Self {
        Self {
            answers,
            company_name: None,
        }
    }
}

/// Rows written for a submission and where to send the visitor.
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub user: User,
    pub inquiry: Inquiry,
    pub response: QuestionnaireResponse,
    pub results: ResultsQuery,
}

#[derive(Clone)]
pub struct SubmissionPipeline {
    store: Arc<dyn LeadStore>,
    notifier: Notifier,
}

impl std::fmt::Debug for SubmissionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionPipeline")
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

impl SubmissionPipeline {
    #[must_use]
    pub fn new(store: Arc<dyn LeadStore>, notifier: Notifier) -> Self {
        Self { store, notifier }
    }

    /// Store a submission and queue its notifications.
    ///
    /// # Errors
    ///
    /// Returns `Validation` when the name or email is missing, the email
    /// is malformed or the size is too large (nothing is written), or
    /// `Store` when a write fails.
    #[instrument(skip(self, submission), fields(space_type = %submission.answers.space_type))]
    pub async fn submit(&self, submission: Submission) -> Result<SubmissionOutcome, SubmissionError> {
        let Submission {
            answers,
            company_name,
        } = submission;

        let name = non_empty(&answers.name)
            .ok_or_else(|| SubmissionError::Validation("Name is required".to_owned()))?;
        if answers.email.trim().is_empty() {
            return Err(SubmissionError::Validation("Email is required".to_owned()));
        }
        let email = Email::parse(&answers.email)
            .map_err(|e| SubmissionError::Validation(format!("Invalid email: {e}")))?;
        if answers.size > MAX_SIZE_SQFT {
            return Err(SubmissionError::Validation(format!(
                "Size must be at most {MAX_SIZE_SQFT} sq ft"
            )));
        }
        let phone = non_empty(&answers.phone);
        let company_name = company_name.as_deref().and_then(non_empty);

        let user = self
            .store
            .upsert_user(NewUser {
                email: email.clone(),
                full_name: name.clone(),
                phone: phone.clone(),
                company_name: company_name.clone(),
            })
            .await
            .map_err(|source| {
                error!(error = %source, "Failed to upsert user");
                SubmissionError::Store {
                    stage: Stage::User,
                    source,
                }
            })?;

        let inquiry = self
            .store
            .create_inquiry(NewInquiry {
                user_id: user.id,
                full_name: name.clone(),
                email: email.clone(),
                phone: phone.clone(),
                inquiry_type: InquiryType::Questionnaire,
                message: None,
            })
            .await
            .map_err(|source| {
                error!(user_id = %user.id, error = %source, "Failed to create inquiry");
                SubmissionError::Store {
                    stage: Stage::Inquiry,
                    source,
                }
            })?;

        let responses = serde_json::to_value(&answers).unwrap_or(Value::Null);
        let response = self
            .store
            .create_response(NewQuestionnaireResponse {
                user_id: user.id,
                inquiry_id: inquiry.id,
                lease_or_buy: answers.lease_or_buy.clone(),
                space_type: answers.space_type.clone(),
                size_range: answers.size_range(),
                location_preference: answers.location.clone(),
                timeline: answers.timeline.clone(),
                responses,
            })
            .await
            .map_err(|source| {
                error!(
                    user_id = %user.id,
                    inquiry_id = %inquiry.id,
                    error = %source,
                    "Failed to create questionnaire response"
                );
                SubmissionError::Store {
                    stage: Stage::Response,
                    source,
                }
            })?;

        info!(
            user_id = %user.id,
            inquiry_id = %inquiry.id,
            response_id = %response.id,
            "Questionnaire stored"
        );

        self.notifier.questionnaire_completed(QuestionnaireNotice {
            user_id: user.id,
            inquiry_id: inquiry.id,
            name,
            email: email.into_inner(),
            phone,
            company_name,
            lease_or_buy: answers.lease_or_buy.clone(),
            space_type: answers.space_type.clone(),
            size: answers.size,
            location: answers.location.clone(),
            timeline: answers.timeline.clone(),
            admin_url: self.notifier.admin_link("/inquiries"),
        });

        let results = ResultsQuery::from_answers(&answers, Some(user.id));
        Ok(SubmissionOutcome {
            user,
            inquiry,
            response,
            results,
        })
    }
}
