//! Questionnaire route handlers.
//!
//! The wizard is server-rendered. Each POST carries the step being shown,
//! the fields on that step and the button pressed. Answers live in the
//! session draft; the step number only says which page the visitor saw,
//! and [`Wizard::at`] refuses to land past an unanswered step.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{instrument, warn};

use lease_small_space_core::analytics::TrackedEvent;
use lease_small_space_core::questionnaire::options::{
    Choice, LEASE_OR_BUY, LOCATIONS, SIZE_PRESETS, SPACE_TYPES, TIMELINES,
};
use lease_small_space_core::questionnaire::{
    Action, Answers, FieldUpdate, Outcome, Step, Wizard,
};

use super::PageMeta;
use crate::filters;
use crate::middleware::Visitor;
use crate::services::{DraftStore, MemoryDrafts, SessionDrafts, WizardDriver};
use crate::state::AppState;

/// A selectable card on a step.
#[derive(Debug, Clone)]
pub struct ChoiceView {
    pub id: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub selected: bool,
}

fn choices(catalogue: &'static [Choice], current: &str) -> Vec<ChoiceView> {
    catalogue
        .iter()
        .map(|c| ChoiceView {
            id: c.id,
            title: c.title,
            subtitle: c.subtitle,
            selected: c.id == current,
        })
        .collect()
}

/// A quick-pick size button.
#[derive(Debug, Clone)]
pub struct PresetView {
    pub size: u32,
    pub selected: bool,
}

/// Questionnaire page template.
#[derive(Template, WebTemplate)]
#[template(path = "questionnaire.html")]
pub struct QuestionnaireTemplate {
    pub meta: PageMeta,
    pub step_number: u8,
    pub step_count: u8,
    pub step_name: &'static str,
    pub progress: u8,
    pub is_first: bool,
    pub is_last: bool,
    pub answers: Answers,
    pub choices: Vec<ChoiceView>,
    pub presets: Vec<PresetView>,
    /// Location typed by hand rather than picked from the list.
    pub custom_location: String,
    pub message: Option<String>,
    pub scroll_to_top: bool,
}

impl QuestionnaireTemplate {
    fn new(state: &AppState, wizard: &Wizard, message: Option<String>, scroll_to_top: bool) -> Self {
        let step = wizard.step();
        let answers = wizard.answers().clone();
        let choices = match step {
            Step::LeaseOrBuy => choices(LEASE_OR_BUY, &answers.lease_or_buy),
            Step::SpaceType => choices(SPACE_TYPES, &answers.space_type),
            Step::Location => choices(LOCATIONS, &answers.location),
            Step::Timeline => choices(TIMELINES, &answers.timeline),
            Step::Size | Step::Contact => Vec::new(),
        };
        let custom_location = if LOCATIONS.iter().any(|c| c.id == answers.location) {
            String::new()
        } else {
            answers.location.clone()
        };
        let presets = SIZE_PRESETS
            .iter()
            .map(|&size| PresetView {
                size,
                selected: size == answers.size,
            })
            .collect();

        Self {
            meta: PageMeta::new(
                state.config(),
                "Find Your Space",
                "Answer six quick questions to see matching commercial spaces.",
            ),
            step_number: step.number(),
            step_count: Step::COUNT,
            step_name: step.name(),
            progress: step.progress_percent(),
            is_first: step.is_first(),
            is_last: step.is_last(),
            answers,
            choices,
            presets,
            custom_location,
            message: message.or_else(|| wizard.error().map(str::to_owned)),
            scroll_to_top,
        }
    }
}

/// Posted questionnaire form. Only the fields of the shown step are sent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireForm {
    pub step: u8,
    #[serde(default)]
    pub action: String,
    pub lease_or_buy: Option<String>,
    pub space_type: Option<String>,
    pub size: Option<String>,
    pub location: Option<String>,
    /// Free-text location; wins over a picked one when filled.
    pub custom_location: Option<String>,
    pub timeline: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub sms_consent: Option<String>,
}

/// Parse a size field; anything unreadable becomes 0 so the size guard
/// rejects it.
fn parse_size(raw: &str) -> u32 {
    raw.trim().replace(',', "").parse().unwrap_or(0)
}

impl QuestionnaireForm {
    /// Field updates for values that differ from the current answers.
    fn updates(&self, step: Step, current: &Answers) -> Vec<FieldUpdate> {
        let mut updates = Vec::new();
        let mut text = |value: &Option<String>, existing: &str, make: fn(String) -> FieldUpdate| {
            if let Some(value) = value
                && value.trim() != existing
            {
                updates.push(make(value.trim().to_owned()));
            }
        };

        text(&self.lease_or_buy, &current.lease_or_buy, FieldUpdate::LeaseOrBuy);
        text(&self.space_type, &current.space_type, FieldUpdate::SpaceType);
        let location = self
            .custom_location
            .as_ref()
            .filter(|v| !v.trim().is_empty())
            .or(self.location.as_ref())
            .cloned();
        text(&location, &current.location, FieldUpdate::Location);
        text(&self.timeline, &current.timeline, FieldUpdate::Timeline);
        text(&self.name, &current.name, FieldUpdate::Name);
        text(&self.email, &current.email, FieldUpdate::Email);
        text(&self.phone, &current.phone, FieldUpdate::Phone);

        if let Some(size) = &self.size {
            let size = parse_size(size);
            if size != current.size {
                updates.push(FieldUpdate::Size(size));
            }
        }
        // An unticked checkbox is simply absent.
        if step == Step::Contact {
            let consent = self.sms_consent.is_some();
            if consent != current.sms_consent {
                updates.push(FieldUpdate::SmsConsent(consent));
            }
        }
        updates
    }

    fn navigation(&self) -> Option<Action> {
        match self.action.as_str() {
            "next" => Some(Action::Next),
            "back" => Some(Action::Back),
            _ => None,
        }
    }
}

fn drafts_for(visitor: &Visitor) -> Box<dyn DraftStore> {
    match &visitor.session {
        Some(session) => Box::new(SessionDrafts::new(session.clone())),
        None => Box::new(MemoryDrafts::new()),
    }
}

async fn load_draft(drafts: &dyn DraftStore) -> Answers {
    match drafts.load().await {
        Ok(draft) => draft.unwrap_or_default(),
        Err(e) => {
            warn!(error = %e, "Failed to load questionnaire draft");
            Answers::default()
        }
    }
}

/// Show the first step, resuming any saved answers.
#[instrument(skip(state, visitor))]
pub async fn show(State(state): State<AppState>, visitor: Visitor) -> QuestionnaireTemplate {
    let drafts = drafts_for(&visitor);
    let wizard = Wizard::resume(load_draft(drafts.as_ref()).await);

    let analytics = state.analytics();
    analytics.track(
        TrackedEvent::page_view("/questionnaire", "Questionnaire"),
        &visitor.context,
    );
    analytics.track(TrackedEvent::step_viewed(wizard.step()), &visitor.context);

    QuestionnaireTemplate::new(&state, &wizard, None, false)
}

/// Apply a posted step and move forward or back.
#[instrument(skip(state, visitor, form), fields(step = form.step, action = %form.action))]
pub async fn advance(
    State(state): State<AppState>,
    mut visitor: Visitor,
    Form(form): Form<QuestionnaireForm>,
) -> Response {
    let drafts = drafts_for(&visitor);
    let answers = load_draft(drafts.as_ref()).await;
    let step = Step::from_number(form.step).unwrap_or_default();
    let wizard = Wizard::at(step, answers);

    let mut actions: Vec<Action> = form
        .updates(wizard.step(), wizard.answers())
        .into_iter()
        .map(Action::Set)
        .collect();
    actions.extend(form.navigation());

    let dispatched = {
        let mut driver = WizardDriver::new(
            drafts.as_ref(),
            state.analytics(),
            state.pipeline(),
            visitor.context.clone(),
        );
        driver.dispatch(wizard, actions).await
    };

    if let Some(user_id) = dispatched.stored_user {
        visitor.identify(user_id).await;
    }
    if let Some(location) = dispatched.redirect {
        return Redirect::to(&location).into_response();
    }

    let message = match dispatched.outcome {
        Outcome::Blocked { reason, .. } => Some(reason.to_owned()),
        Outcome::Applied | Outcome::Ignored => None,
    };
    QuestionnaireTemplate::new(&state, &dispatched.wizard, message, dispatched.scroll_to_top)
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("2,500"), 2500);
        assert_eq!(parse_size(" 900 "), 900);
        assert_eq!(parse_size("big"), 0);
    }

    #[test]
    fn test_updates_only_changed_fields() {
        let current = Answers {
            lease_or_buy: "lease".to_owned(),
            ..Answers::default()
        };
        let form = QuestionnaireForm {
            step: 1,
            action: "next".to_owned(),
            lease_or_buy: Some("lease".to_owned()),
            size: Some("2000".to_owned()),
            ..QuestionnaireForm::default()
        };
        assert!(form.updates(Step::LeaseOrBuy, &current).is_empty());
        assert_eq!(form.navigation(), Some(Action::Next));
    }

    #[test]
    fn test_custom_location_wins() {
        let form = QuestionnaireForm {
            step: 4,
            location: Some("denver".to_owned()),
            custom_location: Some("Fort Collins".to_owned()),
            ..QuestionnaireForm::default()
        };
        assert_eq!(
            form.updates(Step::Location, &Answers::default()),
            vec![FieldUpdate::Location("Fort Collins".to_owned())]
        );
    }

    #[test]
    fn test_unticked_consent_on_contact_step() {
        let form = QuestionnaireForm {
            step: 6,
            ..QuestionnaireForm::default()
        };
        assert_eq!(
            form.updates(Step::Contact, &Answers::default()),
            vec![FieldUpdate::SmsConsent(false)]
        );
        assert!(form.updates(Step::Timeline, &Answers::default()).is_empty());
    }
}
