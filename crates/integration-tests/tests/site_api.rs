//! Integration tests for the site's JSON endpoints.
//!
//! Submissions and captured leads are checked against the rows written to
//! the in-memory store.

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use lease_small_space_integration_tests::{TestClient, site_app};
use lease_small_space_site::db::MemoryLeadStore;

fn submission(email: &str, size: serde_json::Value) -> serde_json::Value {
    json!({
        "user": {
            "name": "Dana Ruiz",
            "email": email,
            "phone": "303-555-0142",
            "companyName": "Ruiz Fabrication"
        },
        "response": {
            "leaseOrBuy": "lease",
            "spaceType": "warehouse",
            "size": size,
            "location": "denver",
            "timeline": "asap"
        }
    })
}

// =============================================================================
// Questionnaire Submission Tests
// =============================================================================

#[tokio::test]
async fn test_submit_without_email_writes_nothing() {
    let store = Arc::new(MemoryLeadStore::new());
    let mut client = TestClient::new(site_app(Arc::clone(&store)));

    let response = client
        .post_json(
            "/api/questionnaire-submit",
            &json!({"user": {"name": "Dana"}, "response": {"size": 2000}}),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "Email and name are required");
    assert!(store.users().await.is_empty());
    assert!(store.inquiries().await.is_empty());
    assert!(store.responses().await.is_empty());
}

#[tokio::test]
async fn test_submit_without_name_writes_nothing() {
    let store = Arc::new(MemoryLeadStore::new());
    let mut client = TestClient::new(site_app(Arc::clone(&store)));

    let response = client
        .post_json(
            "/api/questionnaire-submit",
            &json!({"user": {"email": "dana@example.com", "name": "  "}}),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(store.users().await.is_empty());
}

#[tokio::test]
async fn test_submit_stores_user_inquiry_and_response() {
    let store = Arc::new(MemoryLeadStore::new());
    let mut client = TestClient::new(site_app(Arc::clone(&store)));

    let response = client
        .post_json(
            "/api/questionnaire-submit",
            &submission("dana@example.com", json!(2000)),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let reply = response.json();
    assert_eq!(reply["success"], true);

    let users = store.users().await;
    let inquiries = store.inquiries().await;
    let responses = store.responses().await;
    assert_eq!(users.len(), 1);
    assert_eq!(inquiries.len(), 1);
    assert_eq!(responses.len(), 1);

    let user = users.first().expect("one user");
    assert_eq!(reply["userId"], user.id.to_string());
    assert_eq!(user.company_name.as_deref(), Some("Ruiz Fabrication"));

    let inquiry = inquiries.first().expect("one inquiry");
    assert_eq!(inquiry.user_id, user.id);
    assert_eq!(inquiry.inquiry_type.as_str(), "questionnaire");
    assert_eq!(inquiry.status.as_str(), "new");
    assert_eq!(reply["inquiryId"], inquiry.id.to_string());

    let stored = responses.first().expect("one response");
    assert_eq!(stored.inquiry_id, inquiry.id);
    assert_eq!(stored.location_preference, "denver");
    assert_eq!(stored.responses["spaceType"], "warehouse");

    let results_url = reply["resultsUrl"].as_str().expect("results url");
    assert!(results_url.starts_with("/results?spaceType=warehouse&size=2000&location=denver"));
    assert!(results_url.ends_with(&format!("userId={}", user.id)));
}

#[tokio::test]
async fn test_same_email_reuses_user() {
    let store = Arc::new(MemoryLeadStore::new());
    let mut client = TestClient::new(site_app(Arc::clone(&store)));

    for _ in 0..2 {
        let response = client
            .post_json("/api/questionnaire-submit", &submission("dana@example.com", json!(2000)))
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let users = store.users().await;
    let inquiries = store.inquiries().await;
    assert_eq!(users.len(), 1);
    assert_eq!(inquiries.len(), 2);
    let user_id = users.first().expect("one user").id;
    assert!(inquiries.iter().all(|i| i.user_id == user_id));
}

#[tokio::test]
async fn test_size_ranges() {
    let cases = [
        (json!(2000), 1500, 3000),
        (json!("1,000"), 500, 2000),
        (json!(300), 500, 1300),
        (json!(10_000), 9500, 11_000),
    ];

    for (size, min, max) in cases {
        let store = Arc::new(MemoryLeadStore::new());
        let mut client = TestClient::new(site_app(Arc::clone(&store)));
        let response = client
            .post_json(
                "/api/questionnaire-submit",
                &submission("dana@example.com", size.clone()),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "size {size}");

        let responses = store.responses().await;
        let stored = responses.first().expect("one response");
        assert_eq!((stored.size_min, stored.size_max), (min, max), "size {size}");
    }
}

#[tokio::test]
async fn test_oversize_rejected_before_any_write() {
    let store = Arc::new(MemoryLeadStore::new());
    let mut client = TestClient::new(site_app(Arc::clone(&store)));

    let response = client
        .post_json(
            "/api/questionnaire-submit",
            &submission("dana@example.com", json!(3_000_000_000_u64)),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(store.users().await.is_empty());
    assert!(store.inquiries().await.is_empty());
    assert!(store.responses().await.is_empty());
}

// =============================================================================
// Lead Capture Tests
// =============================================================================

#[tokio::test]
async fn test_lead_capture_stores_lead() {
    let store = Arc::new(MemoryLeadStore::new());
    let mut client = TestClient::new(site_app(Arc::clone(&store)));

    let response = client
        .post_json(
            "/api/lead-capture",
            &json!({
                "name": "Sam Patel",
                "email": "sam@example.com",
                "phone": "720-555-0101",
                "page": "/results?location=arvada",
                "timestamp": "2026-10-01T15:30:00Z"
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let reply = response.json();
    assert_eq!(reply["success"], true);
    assert_eq!(reply["message"], "Lead captured successfully");

    let leads = store.leads().await;
    let lead = leads.first().expect("one lead");
    assert_eq!(reply["leadId"], lead.id.to_string());
    assert_eq!(lead.source, "inactivity_popup");
    assert_eq!(lead.page_captured, "/results?location=arvada");
    assert_eq!(lead.status.as_str(), "new");
}

#[tokio::test]
async fn test_lead_capture_requires_phone() {
    let store = Arc::new(MemoryLeadStore::new());
    let mut client = TestClient::new(site_app(Arc::clone(&store)));

    let response = client
        .post_json(
            "/api/lead-capture",
            &json!({"name": "Sam Patel", "email": "sam@example.com"}),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "Name, email, and phone are required");
    assert!(store.leads().await.is_empty());
}

#[tokio::test]
async fn test_google_maps_script_not_configured() {
    let mut client = TestClient::new(site_app(Arc::new(MemoryLeadStore::new())));
    let response = client.get("/api/google-maps-script").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_health() {
    let mut client = TestClient::new(site_app(Arc::new(MemoryLeadStore::new())));
    assert_eq!(client.get("/health").await.body, "ok");
    assert_eq!(client.get("/health/ready").await.status, StatusCode::OK);
}
