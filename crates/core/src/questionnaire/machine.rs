//! Questionnaire state machine.
//!
//! [`Wizard::reduce`] is pure: it returns the next state plus the
//! [`Effect`]s a driver must carry out. Nothing here touches storage,
//! sessions or the network.

use super::{Answers, FieldUpdate, ResultsQuery, Step};
use crate::analytics::TrackedEvent;
use crate::types::{InquiryId, UserId};

/// Where the wizard is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Editing,
    /// Contact step passed, waiting on the submission pipeline.
    Submitting,
    /// Submission stored. Terminal.
    Done,
}

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Set(FieldUpdate),
    Next,
    Back,
    SubmitSucceeded { user_id: UserId, inquiry_id: InquiryId },
    SubmitFailed { message: String },
}

/// Work requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SaveDraft(Answers),
    ClearDraft,
    /// Presentation hint: bring the top of the form into view.
    ScrollToTop,
    Track(TrackedEvent),
    Submit(Answers),
    NavigateToResults(ResultsQuery),
}

/// What happened to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// Forward navigation refused because the step's guard failed.
    Blocked { step: Step, reason: &'static str },
    /// The action has no meaning in the current phase.
    Ignored,
}

/// Result of [`Wizard::reduce`].
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub wizard: Wizard,
    pub effects: Vec<Effect>,
    pub outcome: Outcome,
}

impl Transition {
    const fn applied(wizard: Wizard, effects: Vec<Effect>) -> Self {
        Self {
            wizard,
            effects,
            outcome: Outcome::Applied,
        }
    }

    const fn unchanged(wizard: Wizard, outcome: Outcome) -> Self {
        Self {
            wizard,
            effects: Vec::new(),
            outcome,
        }
    }
}

/// Questionnaire state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Wizard {
    step: Step,
    phase: Phase,
    answers: Answers,
    error: Option<String>,
}

impl Wizard {
    /// A fresh wizard on the first step with default answers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start on the first step with previously saved answers.
    #[must_use]
    pub fn resume(answers: Answers) -> Self {
        Self {
            answers,
            ..Self::default()
        }
    }

    /// Rebuild a wizard at `step` for the given answers.
    ///
    /// Never lands past the first earlier step whose guard fails, so a
    /// forged step number cannot skip questions.
    #[must_use]
    pub fn at(step: Step, answers: Answers) -> Self {
        let step = Step::ALL
            .into_iter()
            .take_while(|s| *s < step)
            .find(|s| !s.is_complete(&answers))
            .unwrap_or(step);
        Self {
            step,
            answers,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn step(&self) -> Step {
        self.step
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn answers(&self) -> &Answers {
        &self.answers
    }

    /// Submission error to show on the contact step.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether `Next` would be accepted.
    #[must_use]
    pub fn can_proceed(&self) -> bool {
        self.step.is_complete(&self.answers)
    }

    /// Advance the state machine by one action.
    #[must_use]
    pub fn reduce(mut self, action: Action) -> Transition {
        match (self.phase, action) {
            (Phase::Editing, Action::Set(update)) => {
                let tracked = TrackedEvent::field_completed(&update);
                self.answers.apply(update);
                self.error = None;
                let draft = self.answers.clone();
                Transition::applied(self, vec![Effect::SaveDraft(draft), Effect::Track(tracked)])
            }
            (Phase::Editing, Action::Next) => {
                if !self.can_proceed() {
                    let outcome = Outcome::Blocked {
                        step: self.step,
                        reason: self.step.requirement(),
                    };
                    return Transition::unchanged(self, outcome);
                }
                match self.step.next() {
                    Some(next) => {
                        self.step = next;
                        let draft = self.answers.clone();
                        Transition::applied(
                            self,
                            vec![
                                Effect::ScrollToTop,
                                Effect::SaveDraft(draft),
                                Effect::Track(TrackedEvent::step_viewed(next)),
                            ],
                        )
                    }
                    None => {
                        self.phase = Phase::Submitting;
                        self.error = None;
                        let completed = TrackedEvent::completed(&self.answers);
                        let answers = self.answers.clone();
                        Transition::applied(
                            self,
                            vec![Effect::Track(completed), Effect::Submit(answers)],
                        )
                    }
                }
            }
            (Phase::Editing, Action::Back) => match self.step.previous() {
                Some(previous) => {
                    self.step = previous;
                    Transition::applied(
                        self,
                        vec![
                            Effect::ScrollToTop,
                            Effect::Track(TrackedEvent::step_viewed(previous)),
                        ],
                    )
                }
                None => Transition::unchanged(self, Outcome::Ignored),
            },
            (Phase::Submitting, Action::SubmitSucceeded { user_id, inquiry_id }) => {
                self.phase = Phase::Done;
                let query = ResultsQuery::from_answers(&self.answers, Some(user_id));
                Transition::applied(
                    self,
                    vec![
                        Effect::ClearDraft,
                        Effect::Track(TrackedEvent::lead_generated(user_id, inquiry_id)),
                        Effect::NavigateToResults(query),
                    ],
                )
            }
            (Phase::Submitting, Action::SubmitFailed { message }) => {
                self.phase = Phase::Editing;
                self.step = Step::Contact;
                let tracked = TrackedEvent::submission_error(&message);
                self.error = Some(message);
                Transition::applied(self, vec![Effect::Track(tracked)])
            }
            (_, _) => Transition::unchanged(self, Outcome::Ignored),
        }
    }
}
