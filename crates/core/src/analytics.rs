//! Analytics event vocabulary.
//!
//! [`TrackedEvent`] is what the questionnaire and pages emit;
//! [`AnalyticsEvent`] is the append-only row written by the site.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::questionnaire::{Answers, FieldUpdate, Step};
use crate::types::{InquiryId, UserId};

/// Events the site records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventName {
    PageView,
    QuestionnaireStepViewed,
    QuestionnaireFieldCompleted,
    QuestionnaireCompleted,
    LeadGenerated,
    QuestionnaireSubmissionError,
}

impl EventName {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PageView => "page_view",
            Self::QuestionnaireStepViewed => "questionnaire_step_viewed",
            Self::QuestionnaireFieldCompleted => "questionnaire_field_completed",
            Self::QuestionnaireCompleted => "questionnaire_completed",
            Self::LeadGenerated => "lead_generated",
            Self::QuestionnaireSubmissionError => "questionnaire_submission_error",
        }
    }
}

impl std::fmt::Display for EventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event with its properties, before request context is attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedEvent {
    pub name: EventName,
    pub properties: Value,
}

impl TrackedEvent {
    #[must_use]
    pub fn page_view(path: &str, title: &str) -> Self {
        Self {
            name: EventName::PageView,
            properties: json!({ "page_path": path, "page_title": title }),
        }
    }

    #[must_use]
    pub fn step_viewed(step: Step) -> Self {
        Self {
            name: EventName::QuestionnaireStepViewed,
            properties: json!({
                "step_number": step.number(),
                "step_name": step.name(),
            }),
        }
    }

    #[must_use]
    pub fn field_completed(update: &FieldUpdate) -> Self {
        Self {
            name: EventName::QuestionnaireFieldCompleted,
            properties: json!({
                "field_name": update.field_name(),
                "field_value": update.analytics_value(),
                "step_number": update.step().number(),
            }),
        }
    }

    #[must_use]
    pub fn completed(answers: &Answers) -> Self {
        Self {
            name: EventName::QuestionnaireCompleted,
            properties: json!({
                "lease_or_buy": answers.lease_or_buy,
                "space_type": answers.space_type,
                "size": answers.size,
                "location": answers.location,
                "timeline": answers.timeline,
            }),
        }
    }

    #[must_use]
    pub fn lead_generated(user_id: UserId, inquiry_id: InquiryId) -> Self {
        Self {
            name: EventName::LeadGenerated,
            properties: json!({
                "user_id": user_id,
                "inquiry_id": inquiry_id,
                "lead_source": "questionnaire",
            }),
        }
    }

    #[must_use]
    pub fn submission_error(message: &str) -> Self {
        Self {
            name: EventName::QuestionnaireSubmissionError,
            properties: json!({ "error": message }),
        }
    }
}

/// A tracked event with the request context it happened in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub event_name: EventName,
    pub event_properties: Value,
    pub user_id: Option<UserId>,
    pub session_id: Option<String>,
    pub page_url: Option<String>,
    pub user_agent: Option<String>,
}

impl AnalyticsEvent {
    /// Attach context to a tracked event.
    #[must_use]
    pub fn new(event: TrackedEvent, context: &EventContext) -> Self {
        Self {
            event_name: event.name,
            event_properties: event.properties,
            user_id: context.user_id,
            session_id: context.session_id.clone(),
            page_url: context.page_url.clone(),
            user_agent: context.user_agent.clone(),
        }
    }
}

/// Where an event came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventContext {
    pub user_id: Option<UserId>,
    pub session_id: Option<String>,
    pub page_url: Option<String>,
    pub user_agent: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_viewed_properties() {
        let event = TrackedEvent::step_viewed(Step::Location);
        assert_eq!(event.name.as_str(), "questionnaire_step_viewed");
        assert_eq!(event.properties["step_number"], 4);
        assert_eq!(event.properties["step_name"], "location");
    }

    #[test]
    fn test_event_name_serializes_as_str() {
        for name in [
            EventName::PageView,
            EventName::QuestionnaireCompleted,
            EventName::QuestionnaireSubmissionError,
        ] {
            assert_eq!(
                serde_json::to_value(name).ok(),
                Some(Value::from(name.as_str()))
            );
        }
    }

    #[test]
    fn test_context_is_attached() {
        let context = EventContext {
            session_id: Some("s-1".to_owned()),
            page_url: Some("/questionnaire".to_owned()),
            ..EventContext::default()
        };
        let event = AnalyticsEvent::new(TrackedEvent::submission_error("boom"), &context);
        assert_eq!(event.session_id.as_deref(), Some("s-1"));
        assert_eq!(event.event_properties["error"], "boom");
        assert!(event.user_id.is_none());
    }
}
