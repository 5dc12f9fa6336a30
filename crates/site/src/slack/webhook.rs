//! Incoming-webhook client.

use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use super::error::SlackError;
use super::types::WebhookMessage;

/// Posts messages to one Slack incoming webhook.
#[derive(Clone)]
pub struct SlackWebhook {
    client: Client,
    url: SecretString,
}

impl std::fmt::Debug for SlackWebhook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackWebhook")
            .field("url", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl SlackWebhook {
    /// Create a webhook client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(url: SecretString) -> Result<Self, SlackError> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self { client, url })
    }

    /// Post a message.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or Slack answers with a non-2xx status.
    #[instrument(skip_all)]
    pub async fn send(&self, message: &WebhookMessage) -> Result<(), SlackError> {
        let response = self
            .client
            .post(self.url.expose_secret())
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SlackError::Api {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Slack webhook delivered");
        Ok(())
    }
}
