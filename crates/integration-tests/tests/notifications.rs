//! Integration tests for new-lead notifications.
//!
//! These tests verify the Slack Block Kit messages and the email bodies
//! built for completed questionnaires and captured leads.

use chrono::{TimeZone, Utc};

use lease_small_space_core::{InquiryId, LeadId, UserId};
use lease_small_space_site::services::email;
use lease_small_space_site::services::{LeadNotice, QuestionnaireNotice};
use lease_small_space_site::slack::messages::{build_lead_message, build_questionnaire_message};
use lease_small_space_site::slack::types::{ActionElement, Block};

fn questionnaire_notice(phone: Option<&str>) -> QuestionnaireNotice {
    QuestionnaireNotice {
        user_id: UserId::new_v4(),
        inquiry_id: InquiryId::new_v4(),
        name: "Dana Ruiz".to_string(),
        email: "dana@example.com".to_string(),
        phone: phone.map(str::to_string),
        company_name: Some("Ruiz & Sons".to_string()),
        lease_or_buy: "lease".to_string(),
        space_type: "warehouse".to_string(),
        size: 2000,
        location: "highlands-ranch".to_string(),
        timeline: "30days".to_string(),
        admin_url: Some("http://localhost:3001/inquiries".to_string()),
    }
}

fn lead_notice() -> LeadNotice {
    LeadNotice {
        lead_id: LeadId::new_v4(),
        name: "Sam Patel".to_string(),
        email: "sam@example.com".to_string(),
        phone: "(720) 555-0101".to_string(),
        source: "inactivity_popup".to_string(),
        page: "/results".to_string(),
        captured_at: Utc.with_ymd_and_hms(2026, 10, 1, 15, 30, 0).unwrap(),
        admin_url: Some("http://localhost:3001/leads".to_string()),
    }
}

fn button_urls(blocks: &[Block]) -> Vec<String> {
    blocks
        .iter()
        .find_map(|b| match b {
            Block::Actions { elements } => Some(
                elements
                    .iter()
                    .map(|ActionElement::Button { url, .. }| url.clone())
                    .collect(),
            ),
            _ => None,
        })
        .expect("an actions block")
}

// =============================================================================
// Slack Message Tests
// =============================================================================

#[test]
fn test_questionnaire_message_structure() {
    let message = build_questionnaire_message(&questionnaire_notice(Some("303-555-0142")));

    let first = message.blocks.first().expect("blocks not empty");
    assert!(matches!(first, Block::Header { .. }));
    assert!(message.text.contains("New Questionnaire"));
}

#[test]
fn test_questionnaire_message_buttons() {
    let message = build_questionnaire_message(&questionnaire_notice(Some("303-555-0142")));
    assert_eq!(
        button_urls(&message.blocks),
        vec![
            "tel:3035550142".to_string(),
            "mailto:dana@example.com".to_string(),
            "http://localhost:3001/inquiries".to_string(),
        ]
    );
}

#[test]
fn test_questionnaire_message_without_phone_has_no_call_button() {
    let message = build_questionnaire_message(&questionnaire_notice(None));
    let urls = button_urls(&message.blocks);
    assert!(urls.iter().all(|u| !u.starts_with("tel:")));
    assert!(urls.contains(&"mailto:dana@example.com".to_string()));
}

#[test]
fn test_questionnaire_message_escapes_user_input() {
    let message = build_questionnaire_message(&questionnaire_notice(None));
    let json = serde_json::to_string(&message).expect("Should serialize");
    assert!(json.contains("Ruiz &amp; Sons"));
    assert!(json.contains("2000 sq ft"));
}

#[test]
fn test_lead_message_serializes_as_block_kit() {
    let message = build_lead_message(&lead_notice());
    let value = serde_json::to_value(&message).expect("Should serialize");

    let blocks = value["blocks"].as_array().expect("blocks array");
    assert_eq!(blocks.first().expect("section")["type"], "section");
    assert_eq!(blocks.get(1).expect("divider")["type"], "divider");

    let summary = value["blocks"][0]["text"]["text"].as_str().expect("summary");
    assert!(summary.contains("*Name:* Sam Patel"));
    assert!(summary.contains("2026-10-01 15:30 UTC"));

    assert_eq!(
        button_urls(&message.blocks),
        vec!["tel:7205550101".to_string(), "mailto:sam@example.com".to_string()]
    );
}

// =============================================================================
// Email Tests
// =============================================================================

#[test]
fn test_confirmation_email_links_results() {
    let notice = questionnaire_notice(Some("303-555-0142"));
    let results_url = format!("http://localhost:3000/results?userId={}", notice.user_id);
    let rendered = email::questionnaire_complete(&notice, &results_url).expect("renders");

    assert_eq!(
        rendered.subject,
        "Your Property Matches Are Ready! - LeaseSmallSpace"
    );
    assert!(rendered.text.contains(&results_url));
    assert!(rendered.text.contains("Highlands Ranch"));
    assert!(rendered.text.contains("Within 30 Days"));
    assert!(rendered.html.contains("View Your Matches"));
}

#[test]
fn test_team_email_links_admin() {
    let notice = questionnaire_notice(Some("303-555-0142"));
    let rendered = email::questionnaire_notification(&notice).expect("renders");

    assert!(rendered.subject.ends_with("Dana Ruiz"));
    assert!(rendered.text.contains("Open in admin: http://localhost:3001/inquiries"));
    assert!(rendered.text.contains("Company: Ruiz & Sons"));
    assert!(rendered.html.contains("Ruiz &#38; Sons"));
    assert!(!rendered.html.contains("Ruiz & Sons"));
}

#[test]
fn test_lead_emails() {
    let notice = lead_notice();

    let welcome = email::welcome_lead(&notice).expect("renders");
    assert!(welcome.subject.starts_with("Welcome to LeaseSmallSpace"));
    assert!(welcome.text.contains("Sam Patel"));

    let team = email::new_lead_notification(&notice).expect("renders");
    assert!(team.subject.contains("Sam Patel"));
    assert!(team.text.contains("Open in admin: http://localhost:3001/leads"));
}
