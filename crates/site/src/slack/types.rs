//! Slack Block Kit types for webhook messages.
//!
//! A subset of the Block Kit specification: enough for a summary
//! section and a row of link buttons.
//!
//! See: <https://api.slack.com/block-kit>

use serde::Serialize;

/// Body posted to an incoming webhook.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookMessage {
    /// Plain text fallback used in notifications.
    pub text: String,
    pub blocks: Vec<Block>,
}

/// Block Kit block types.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Header block with large text.
    Header { text: PlainText },
    /// Section block with markdown text.
    Section { text: Text },
    /// Context block with small muted text.
    Context { elements: Vec<Text> },
    /// Actions block with buttons.
    Actions { elements: Vec<ActionElement> },
    Divider,
}

/// Text object types.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Text {
    PlainText { text: String, emoji: bool },
    Mrkdwn { text: String },
}

impl Text {
    #[must_use]
    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self::Mrkdwn { text: text.into() }
    }
}

/// Plain text object (for headers and button labels).
#[derive(Debug, Clone, Serialize)]
pub struct PlainText {
    #[serde(rename = "type")]
    pub text_type: &'static str,
    pub text: String,
    pub emoji: bool,
}

impl PlainText {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text_type: "plain_text",
            text: text.into(),
            emoji: true,
        }
    }
}

/// Action block elements.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionElement {
    /// Button that opens a URL (`tel:`, `mailto:` or https).
    Button {
        text: PlainText,
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<ButtonStyle>,
    },
}

impl ActionElement {
    #[must_use]
    pub fn link(label: &str, url: String) -> Self {
        Self::Button {
            text: PlainText::new(label),
            url,
            style: None,
        }
    }
}

/// Button style (affects color).
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonStyle {
    Primary,
}
