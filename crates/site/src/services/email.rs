//! Transactional email through the Resend HTTP API.
//!
//! Every message is sent with both an HTML and a plain-text body rendered
//! from Askama templates.

use std::sync::Arc;
use std::time::Duration;

use askama::Template;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use super::notify::{LeadNotice, QuestionnaireNotice};
use crate::config::EmailConfig;

/// Resend API base URL.
const BASE_URL: &str = "https://api.resend.com";

#[derive(Template)]
#[template(path = "email/questionnaire_complete.html")]
struct QuestionnaireCompleteHtml<'a> {
    notice: &'a QuestionnaireNotice,
    results_url: &'a str,
}

#[derive(Template)]
#[template(path = "email/questionnaire_complete.txt")]
struct QuestionnaireCompleteText<'a> {
    notice: &'a QuestionnaireNotice,
    results_url: &'a str,
}

#[derive(Template)]
#[template(path = "email/questionnaire_notification.html")]
struct QuestionnaireNotificationHtml<'a> {
    notice: &'a QuestionnaireNotice,
}

#[derive(Template)]
#[template(path = "email/questionnaire_notification.txt")]
struct QuestionnaireNotificationText<'a> {
    notice: &'a QuestionnaireNotice,
}

#[derive(Template)]
#[template(path = "email/welcome_lead.html")]
struct WelcomeLeadHtml<'a> {
    notice: &'a LeadNotice,
}

#[derive(Template)]
#[template(path = "email/welcome_lead.txt")]
struct WelcomeLeadText<'a> {
    notice: &'a LeadNotice,
}

#[derive(Template)]
#[template(path = "email/new_lead_notification.html")]
struct NewLeadNotificationHtml<'a> {
    notice: &'a LeadNotice,
}

#[derive(Template)]
#[template(path = "email/new_lead_notification.txt")]
struct NewLeadNotificationText<'a> {
    notice: &'a LeadNotice,
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Invalid API key header value.
    #[error("Invalid API key format: {0}")]
    InvalidKey(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

/// A rendered message ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Resend API client.
#[derive(Clone)]
pub struct EmailService {
    inner: Arc<EmailServiceInner>,
}

struct EmailServiceInner {
    client: reqwest::Client,
    from_address: String,
}

impl std::fmt::Debug for EmailService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailService")
            .field("from_address", &self.inner.from_address)
            .finish_non_exhaustive()
    }
}

impl EmailService {
    /// Create a new email service from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the API key is not a valid header value or the
    /// HTTP client fails to build.
    pub fn new(config: &EmailConfig) -> Result<Self, EmailError> {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", config.api_key.expose_secret());
        let mut auth = HeaderValue::from_str(&auth_value)
            .map_err(|e| EmailError::InvalidKey(e.to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            inner: Arc::new(EmailServiceInner {
                client,
                from_address: config.from_address.clone(),
            }),
        })
    }

    /// Send a rendered message to one recipient.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or Resend rejects the message.
    #[instrument(skip(self, email), fields(subject = %email.subject))]
    pub async fn send(&self, to: &str, email: &RenderedEmail) -> Result<(), EmailError> {
        let request = SendEmailRequest {
            from: &self.inner.from_address,
            to: [to],
            subject: &email.subject,
            html: &email.html,
            text: &email.text,
        };

        let response = self
            .inner
            .client
            .post(format!("{BASE_URL}/emails"))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EmailError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let sent: SendEmailResponse = response.json().await?;
        tracing::info!(email_id = %sent.id, "Email sent successfully");
        Ok(())
    }
}

/// Confirmation to the visitor who finished the questionnaire.
///
/// # Errors
///
/// Returns error if a template fails to render.
pub fn questionnaire_complete(
    notice: &QuestionnaireNotice,
    results_url: &str,
) -> Result<RenderedEmail, EmailError> {
    Ok(RenderedEmail {
        subject: "Your Property Matches Are Ready! - LeaseSmallSpace".to_string(),
        html: QuestionnaireCompleteHtml {
            notice,
            results_url,
        }
        .render()?,
        text: QuestionnaireCompleteText {
            notice,
            results_url,
        }
        .render()?,
    })
}

/// Team notice for a completed questionnaire.
///
/// # Errors
///
/// Returns error if a template fails to render.
pub fn questionnaire_notification(
    notice: &QuestionnaireNotice,
) -> Result<RenderedEmail, EmailError> {
    Ok(RenderedEmail {
        subject: format!("🎯 New Questionnaire Completed: {}", notice.name),
        html: QuestionnaireNotificationHtml { notice }.render()?,
        text: QuestionnaireNotificationText { notice }.render()?,
    })
}

/// Welcome message to a capture-modal lead.
///
/// # Errors
///
/// Returns error if a template fails to render.
pub fn welcome_lead(notice: &LeadNotice) -> Result<RenderedEmail, EmailError> {
    Ok(RenderedEmail {
        subject: "Welcome to LeaseSmallSpace - Your Expert Will Contact You Soon!".to_string(),
        html: WelcomeLeadHtml { notice }.render()?,
        text: WelcomeLeadText { notice }.render()?,
    })
}

/// Team notice for a capture-modal lead.
///
/// # Errors
///
/// Returns error if a template fails to render.
pub fn new_lead_notification(notice: &LeadNotice) -> Result<RenderedEmail, EmailError> {
    Ok(RenderedEmail {
        subject: format!("🎯 New Lead: {} wants to speak to an expert", notice.name),
        html: NewLeadNotificationHtml { notice }.render()?,
        text: NewLeadNotificationText { notice }.render()?,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use lease_small_space_core::{InquiryId, LeadId, UserId};

    use super::*;

    fn questionnaire() -> QuestionnaireNotice {
        QuestionnaireNotice {
            user_id: UserId::new_v4(),
            inquiry_id: InquiryId::new_v4(),
            name: "Dana <Ruiz>".to_string(),
            email: "dana@example.com".to_string(),
            phone: Some("303-555-0100".to_string()),
            company_name: None,
            lease_or_buy: "lease".to_string(),
            space_type: "warehouse".to_string(),
            size: 2000,
            location: "Arvada".to_string(),
            timeline: "30days".to_string(),
            admin_url: None,
        }
    }

    #[test]
    fn test_questionnaire_complete_renders_summary() {
        let notice = questionnaire();
        let email = questionnaire_complete(&notice, "https://lss.test/results?userId=1").unwrap();
        assert!(email.subject.contains("Property Matches"));
        assert!(email.text.contains("2000 sq ft"));
        assert!(email.text.contains("https://lss.test/results?userId=1"));
        // HTML body escapes user input; the text body does not.
        assert!(email.html.contains("Dana &#60;Ruiz&#62;") || email.html.contains("Dana &lt;Ruiz&gt;"));
        assert!(email.text.contains("Dana <Ruiz>"));
    }

    #[test]
    fn test_questionnaire_notification_subject() {
        let email = questionnaire_notification(&questionnaire()).unwrap();
        assert_eq!(email.subject, "🎯 New Questionnaire Completed: Dana <Ruiz>");
        assert!(email.text.contains("Within 30 Days"));
    }

    #[test]
    fn test_lead_emails_render() {
        let notice = LeadNotice {
            lead_id: LeadId::new_v4(),
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            phone: "720-555-0101".to_string(),
            source: "inactivity_popup".to_string(),
            page: "/results".to_string(),
            captured_at: Utc.with_ymd_and_hms(2026, 10, 1, 15, 30, 0).unwrap(),
            admin_url: None,
        };
        let welcome = welcome_lead(&notice).unwrap();
        assert!(welcome.text.contains("Sam"));
        let team = new_lead_notification(&notice).unwrap();
        assert!(team.subject.starts_with("🎯 New Lead: Sam"));
        assert!(team.text.contains("/results"));
    }
}
