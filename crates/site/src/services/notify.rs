//! Best-effort notifications for new questionnaires and leads.
//!
//! Each notice fans out to a visitor email, a team email and a Slack
//! message. Delivery runs on a spawned task; failures are logged at
//! `warn` and never reach the caller.

use chrono::{DateTime, Utc};
use tracing::{Instrument, debug, info_span, warn};

use lease_small_space_core::questionnaire::options::{LOCATIONS, SPACE_TYPES, TIMELINES, label_for};
use lease_small_space_core::{InquiryId, LeadId, UserId};

use super::email::{self, EmailError, EmailService, RenderedEmail};
use crate::config::SiteConfig;
use crate::slack::{SlackError, SlackWebhook, WebhookMessage, messages};

/// A stored questionnaire, as reported to the visitor and the team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionnaireNotice {
    pub user_id: UserId,
    pub inquiry_id: InquiryId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub lease_or_buy: String,
    pub space_type: String,
    pub size: u32,
    pub location: String,
    pub timeline: String,
    /// Link to the lead in the admin, when an admin URL is configured.
    pub admin_url: Option<String>,
}

impl QuestionnaireNotice {
    #[must_use]
    pub fn space_type_label(&self) -> &str {
        label_for(SPACE_TYPES, &self.space_type)
    }

    #[must_use]
    pub fn location_label(&self) -> &str {
        label_for(LOCATIONS, &self.location)
    }

    #[must_use]
    pub fn timeline_label(&self) -> &str {
        label_for(TIMELINES, &self.timeline)
    }
}

/// A stored capture-modal lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadNotice {
    pub lead_id: LeadId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub source: String,
    pub page: String,
    pub captured_at: DateTime<Utc>,
    pub admin_url: Option<String>,
}

/// Fire-and-forget dispatcher for notices.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    email: Option<EmailService>,
    slack: Option<SlackWebhook>,
    team_address: String,
    base_url: String,
    admin_base_url: Option<String>,
}

impl Notifier {
    /// Build from configuration. Missing email or Slack settings simply
    /// disable that channel.
    ///
    /// # Errors
    ///
    /// Returns error if an HTTP client cannot be built.
    pub fn from_config(config: &SiteConfig) -> Result<Self, NotifierError> {
        let email = config.email.as_ref().map(EmailService::new).transpose()?;
        let slack = config
            .slack_webhook_url
            .clone()
            .map(SlackWebhook::new)
            .transpose()?;

        Ok(Self {
            email,
            slack,
            team_address: config.notification_email.clone(),
            base_url: config.base_url.clone(),
            admin_base_url: config.admin_base_url.clone(),
        })
    }

    /// A notifier with every channel off.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.email.is_some() || self.slack.is_some()
    }

    /// Admin link for a user, when the admin URL is known.
    #[must_use]
    pub fn admin_link(&self, path: &str) -> Option<String> {
        self.admin_base_url
            .as_ref()
            .map(|base| format!("{base}{path}"))
    }

    /// Results link mailed to a visitor.
    #[must_use]
    pub fn results_link(&self, user_id: UserId) -> String {
        format!("{}/results?userId={user_id}", self.base_url)
    }

    /// Queue notifications for a stored questionnaire.
    pub fn questionnaire_completed(&self, notice: QuestionnaireNotice) {
        if !self.is_enabled() {
            debug!("notifications disabled; skipping questionnaire notice");
            return;
        }
        let notifier = self.clone();
        let span = info_span!("notify_questionnaire", inquiry_id = %notice.inquiry_id);
        tokio::spawn(
            async move {
                let results_url = notifier.results_link(notice.user_id);
                notifier
                    .deliver(
                        &notice.email,
                        || email::questionnaire_complete(&notice, &results_url),
                        || email::questionnaire_notification(&notice),
                        messages::build_questionnaire_message(&notice),
                    )
                    .await;
            }
            .instrument(span),
        );
    }

    /// Queue notifications for a captured lead.
    pub fn lead_captured(&self, notice: LeadNotice) {
        if !self.is_enabled() {
            debug!("notifications disabled; skipping lead notice");
            return;
        }
        let notifier = self.clone();
        let span = info_span!("notify_lead", lead_id = %notice.lead_id);
        tokio::spawn(
            async move {
                notifier
                    .deliver(
                        &notice.email,
                        || email::welcome_lead(&notice),
                        || email::new_lead_notification(&notice),
                        messages::build_lead_message(&notice),
                    )
                    .await;
            }
            .instrument(span),
        );
    }

    async fn deliver(
        &self,
        visitor_address: &str,
        visitor_email: impl FnOnce() -> Result<RenderedEmail, EmailError>,
        team_email: impl FnOnce() -> Result<RenderedEmail, EmailError>,
        slack_message: WebhookMessage,
    ) {
        if let Some(service) = &self.email {
            if let Err(e) = send_rendered(service, visitor_address, visitor_email).await {
                warn!(error = %e, "Failed to send visitor email");
            }
            if let Err(e) = send_rendered(service, &self.team_address, team_email).await {
                warn!(error = %e, "Failed to send team email");
            }
        }
        if let Some(slack) = &self.slack
            && let Err(e) = slack.send(&slack_message).await
        {
            warn!(error = %e, "Failed to post Slack notification");
        }
    }
}

async fn send_rendered(
    service: &EmailService,
    to: &str,
    render: impl FnOnce() -> Result<RenderedEmail, EmailError>,
) -> Result<(), EmailError> {
    let email = render()?;
    service.send(to, &email).await
}

/// Errors building a [`Notifier`].
#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    #[error(transparent)]
    Email(#[from] EmailError),
    #[error(transparent)]
    Slack(#[from] SlackError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_notifier() {
        let notifier = Notifier::disabled();
        assert!(!notifier.is_enabled());
        assert_eq!(notifier.admin_link("/users/1"), None);
    }

    #[test]
    fn test_labels() {
        let notice = QuestionnaireNotice {
            user_id: UserId::new_v4(),
            inquiry_id: InquiryId::new_v4(),
            name: "Dana".to_string(),
            email: "dana@example.com".to_string(),
            phone: None,
            company_name: None,
            lease_or_buy: "buy".to_string(),
            space_type: "mixed-use".to_string(),
            size: 1500,
            location: "castle-rock".to_string(),
            timeline: "flexible".to_string(),
            admin_url: None,
        };
        assert_eq!(notice.space_type_label(), "Mixed-use");
        assert_eq!(notice.location_label(), "Castle Rock");
        assert_eq!(notice.timeline_label(), "Just Exploring");
    }
}
