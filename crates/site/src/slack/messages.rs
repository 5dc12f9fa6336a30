//! Slack message builders for new-lead notifications.

use super::types::{ActionElement, Block, ButtonStyle, PlainText, Text, WebhookMessage};
use crate::services::notify::{LeadNotice, QuestionnaireNotice};

/// Escape the three characters Slack treats as control sequences.
fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn contact_buttons(phone: Option<&str>, email: &str) -> Vec<ActionElement> {
    let mut buttons = Vec::with_capacity(2);
    if let Some(phone) = phone.filter(|p| !p.trim().is_empty()) {
        let dial: String = phone
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        buttons.push(ActionElement::Button {
            text: PlainText::new("Call Now"),
            url: format!("tel:{dial}"),
            style: Some(ButtonStyle::Primary),
        });
    }
    buttons.push(ActionElement::link("Send Email", format!("mailto:{email}")));
    buttons
}

/// Build the message for a completed questionnaire.
#[must_use]
pub fn build_questionnaire_message(notice: &QuestionnaireNotice) -> WebhookMessage {
    let mut summary = format!(
        "*New Questionnaire from {}*\n*Email:* {}\n",
        escape(&notice.name),
        escape(&notice.email)
    );
    if let Some(phone) = &notice.phone {
        summary.push_str(&format!("*Phone:* {}\n", escape(phone)));
    }
    if let Some(company) = &notice.company_name {
        summary.push_str(&format!("*Company:* {}\n", escape(company)));
    }
    summary.push_str(&format!(
        "*Space Type:* {}\n*Size:* {} sq ft\n*Location:* {}\n*Timeline:* {}\n*Type:* {}",
        escape(&notice.space_type),
        notice.size,
        escape(&notice.location),
        escape(&notice.timeline),
        escape(&notice.lease_or_buy),
    ));

    let mut buttons = contact_buttons(notice.phone.as_deref(), &notice.email);
    if let Some(admin_url) = &notice.admin_url {
        buttons.push(ActionElement::link("Open in Admin", admin_url.clone()));
    }

    WebhookMessage {
        text: "🎯 New Questionnaire Completed!".to_string(),
        blocks: vec![
            Block::Header {
                text: PlainText::new("🎯 New Questionnaire Completed"),
            },
            Block::Section {
                text: Text::mrkdwn(summary),
            },
            Block::Context {
                elements: vec![Text::mrkdwn(format!(
                    "Inquiry `{}` • User `{}`",
                    notice.inquiry_id, notice.user_id
                ))],
            },
            Block::Actions { elements: buttons },
        ],
    }
}

/// Build the message for a capture-modal lead.
#[must_use]
pub fn build_lead_message(notice: &LeadNotice) -> WebhookMessage {
    let summary = format!(
        "*New Lead from {}*\n*Name:* {}\n*Email:* {}\n*Phone:* {}\n*Page:* {}\n*Time:* {}",
        escape(&notice.source),
        escape(&notice.name),
        escape(&notice.email),
        escape(&notice.phone),
        escape(&notice.page),
        notice.captured_at.format("%Y-%m-%d %H:%M UTC"),
    );

    WebhookMessage {
        text: "🎯 New Lead Captured from LeaseSmallSpace!".to_string(),
        blocks: vec![
            Block::Section {
                text: Text::mrkdwn(summary),
            },
            Block::Divider,
            Block::Actions {
                elements: contact_buttons(Some(&notice.phone), &notice.email),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("A&B <Co>"), "A&amp;B &lt;Co&gt;");
    }

    #[test]
    fn test_contact_buttons_without_phone() {
        let buttons = contact_buttons(None, "dana@example.com");
        assert_eq!(buttons.len(), 1);
        let ActionElement::Button { url, .. } = &buttons[0];
        assert_eq!(url, "mailto:dana@example.com");
    }

    #[test]
    fn test_contact_buttons_strip_phone_formatting() {
        let buttons = contact_buttons(Some("+1 (303) 555-0100"), "dana@example.com");
        let ActionElement::Button { url, .. } = &buttons[0];
        assert_eq!(url, "tel:+13035550100");
    }
}
