//! Site services: submission, drafts, notifications and analytics.

pub mod analytics;
pub mod drafts;
pub mod email;
pub mod notify;
pub mod pipeline;
pub mod wizard;

pub use analytics::AnalyticsSink;
pub use drafts::{DraftStore, MemoryDrafts, SessionDrafts};
pub use email::EmailService;
pub use notify::{LeadNotice, Notifier, QuestionnaireNotice};
pub use pipeline::{Submission, SubmissionError, SubmissionOutcome, SubmissionPipeline};
pub use wizard::{Dispatched, WizardDriver};
