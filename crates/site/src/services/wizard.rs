//! Runs [`Wizard`] transitions against real collaborators.
//!
//! The reducer only describes work; [`WizardDriver::dispatch`] performs
//! it: drafts are saved or cleared, events are tracked, submissions go
//! through the pipeline and their result is fed back into the reducer.

use std::collections::VecDeque;

use tracing::warn;

use lease_small_space_core::UserId;
use lease_small_space_core::analytics::EventContext;
use lease_small_space_core::questionnaire::{Action, Effect, Outcome, Wizard};

use super::analytics::AnalyticsSink;
use super::drafts::DraftStore;
use super::pipeline::{Submission, SubmissionError, SubmissionPipeline};

/// Shown on the contact step when storing the questionnaire failed.
pub const SUBMIT_FAILED_MESSAGE: &str =
    "We couldn't save your request. Please try again in a moment.";

/// The state to render after an action.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatched {
    pub wizard: Wizard,
    /// Outcome of the visitor's own action.
    pub outcome: Outcome,
    pub scroll_to_top: bool,
    /// Set once the questionnaire is stored.
    pub redirect: Option<String>,
    pub stored_user: Option<UserId>,
}

pub struct WizardDriver<'a> {
    drafts: &'a dyn DraftStore,
    analytics: &'a AnalyticsSink,
    pipeline: &'a SubmissionPipeline,
    context: EventContext,
}

impl<'a> WizardDriver<'a> {
    #[must_use]
    pub const fn new(
        drafts: &'a dyn DraftStore,
        analytics: &'a AnalyticsSink,
        pipeline: &'a SubmissionPipeline,
        context: EventContext,
    ) -> Self {
        Self {
            drafts,
            analytics,
            pipeline,
            context,
        }
    }

    /// Apply `actions` in order, then carry out every effect they
    /// produce. Stops early once an action is blocked.
    pub async fn dispatch(
        &mut self,
        mut wizard: Wizard,
        actions: impl IntoIterator<Item = Action>,
    ) -> Dispatched {
        let mut outcome = Outcome::Ignored;
        let mut pending = VecDeque::new();

        for action in actions {
            let transition = wizard.reduce(action);
            wizard = transition.wizard;
            outcome = transition.outcome;
            pending.extend(transition.effects);
            if matches!(outcome, Outcome::Blocked { .. }) {
                break;
            }
        }

        let mut scroll_to_top = false;
        let mut redirect = None;
        let mut stored_user = None;

        while let Some(effect) = pending.pop_front() {
            match effect {
                Effect::SaveDraft(answers) => {
                    if let Err(e) = self.drafts.save(&answers).await {
                        warn!(error = %e, "Failed to save questionnaire draft");
                    }
                }
                Effect::ClearDraft => {
                    if let Err(e) = self.drafts.clear().await {
                        warn!(error = %e, "Failed to clear questionnaire draft");
                    }
                }
                Effect::ScrollToTop => scroll_to_top = true,
                Effect::Track(event) => self.analytics.track(event, &self.context),
                Effect::Submit(answers) => {
                    let feedback = match self.pipeline.submit(Submission::new(answers)).await {
                        Ok(stored) => {
                            self.context.user_id = Some(stored.user.id);
                            stored_user = Some(stored.user.id);
                            Action::SubmitSucceeded {
                                user_id: stored.user.id,
                                inquiry_id: stored.inquiry.id,
                            }
                        }
                        Err(SubmissionError::Validation(message)) => {
                            Action::SubmitFailed { message }
                        }
                        Err(SubmissionError::Store { .. }) => Action::SubmitFailed {
                            message: SUBMIT_FAILED_MESSAGE.to_owned(),
                        },
                    };
                    let transition = wizard.reduce(feedback);
                    wizard = transition.wizard;
                    pending.extend(transition.effects);
                }
                Effect::NavigateToResults(query) => redirect = Some(query.to_path()),
            }
        }

        Dispatched {
            wizard,
            outcome,
            scroll_to_top,
            redirect,
            stored_user,
        }
    }
}
