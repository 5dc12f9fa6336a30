//! Six-step questionnaire: steps, answers, guards and the state machine.

mod answers;
mod machine;
pub mod options;
mod results;
mod step;

pub use answers::{Answers, DEFAULT_SIZE_SQFT, FieldUpdate, MAX_SIZE_SQFT, MIN_SIZE_SQFT, SizeRange};
pub use machine::{Action, Effect, Outcome, Phase, Transition, Wizard};
pub use results::{RESULTS_PATH, ResultsQuery};
pub use step::Step;

/// Session key holding the in-progress answers.
pub const DRAFT_KEY: &str = "leaseSmallSpace_questionnaire";
