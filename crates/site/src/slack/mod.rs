//! Slack incoming-webhook notifications.
//!
//! New questionnaires and captured leads are posted to a channel as Block
//! Kit messages with "Call Now" and "Send Email" buttons.

mod error;
pub mod messages;
pub mod types;
mod webhook;

pub use error::SlackError;
pub use types::WebhookMessage;
pub use webhook::SlackWebhook;
