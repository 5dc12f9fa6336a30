//! Integration tests for the admin: login, dashboard, listings and CSV
//! export.
//!
//! Rows are produced by the site's submission endpoints and copied into
//! the admin's in-memory store, so both sides agree on the data.

use std::sync::Arc;

use axum::http::{StatusCode, header};
use serde_json::json;

use lease_small_space_admin::db::MemoryAdminStore;
use lease_small_space_integration_tests::{
    ADMIN_TOKEN, TestClient, admin_app, admin_store_from, site_app,
};
use lease_small_space_site::db::MemoryLeadStore;

async fn signed_in(store: MemoryAdminStore) -> TestClient {
    let mut client = TestClient::new(admin_app(store));
    let login = client
        .post_form("/login", &format!("token={ADMIN_TOKEN}"))
        .await;
    assert_eq!(login.status, StatusCode::SEE_OTHER);
    assert_eq!(login.header(header::LOCATION), Some("/"));
    client
}

/// Two questionnaires and one captured lead, written through the site.
async fn seeded() -> MemoryAdminStore {
    let site_store = Arc::new(MemoryLeadStore::new());
    let mut site = TestClient::new(site_app(Arc::clone(&site_store)));

    for (name, email) in [("Dana Ruiz", "dana@example.com"), ("Lee, Park", "lee@example.com")] {
        let response = site
            .post_json(
                "/api/questionnaire-submit",
                &json!({
                    "user": {"name": name, "email": email, "phone": "303-555-0142"},
                    "response": {
                        "leaseOrBuy": "lease",
                        "spaceType": "shop",
                        "size": 2000,
                        "location": "denver",
                        "timeline": "asap"
                    }
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }
    let lead = site
        .post_json(
            "/api/lead-capture",
            &json!({"name": "Sam Patel", "email": "sam@example.com", "phone": "720-555-0101"}),
        )
        .await;
    assert_eq!(lead.status, StatusCode::OK);

    admin_store_from(&site_store).await
}

// =============================================================================
// Auth Tests
// =============================================================================

#[tokio::test]
async fn test_pages_redirect_to_login() {
    let mut client = TestClient::new(admin_app(MemoryAdminStore::new()));
    for path in ["/", "/leads", "/inquiries", "/responses", "/users"] {
        let response = client.get(path).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "{path}");
        assert_eq!(response.header(header::LOCATION), Some("/login"), "{path}");
    }
}

#[tokio::test]
async fn test_export_requires_login() {
    let mut client = TestClient::new(admin_app(MemoryAdminStore::new()));
    let response = client.get("/leads/export.csv").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wrong_token_rejected() {
    let mut client = TestClient::new(admin_app(MemoryAdminStore::new()));

    let login = client.post_form("/login", "token=not-the-token").await;
    assert_eq!(login.status, StatusCode::UNAUTHORIZED);
    assert!(login.body.contains("not valid"));

    assert_eq!(client.get("/").await.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let mut client = signed_in(MemoryAdminStore::new()).await;
    assert_eq!(client.get("/").await.status, StatusCode::OK);
    assert_eq!(
        client.get("/login").await.header(header::LOCATION),
        Some("/")
    );

    let logout = client.post_form("/logout", "").await;
    assert_eq!(logout.header(header::LOCATION), Some("/login"));
    assert_eq!(client.get("/").await.status, StatusCode::SEE_OTHER);
}

// =============================================================================
// Dashboard and Listing Tests
// =============================================================================

#[tokio::test]
async fn test_dashboard_counts_and_recent() {
    let mut client = signed_in(seeded().await).await;

    let dashboard = client.get("/").await;
    assert_eq!(dashboard.status, StatusCode::OK);
    assert!(dashboard.body.contains("Recent activity"));
    assert!(dashboard.body.contains("Sam Patel"));
    assert!(dashboard.body.contains("Dana Ruiz"));
    assert!(dashboard.body.contains("mailto:sam@example.com"));
}

#[tokio::test]
async fn test_empty_dashboard() {
    let mut client = signed_in(MemoryAdminStore::new()).await;
    let dashboard = client.get("/").await;
    assert_eq!(dashboard.status, StatusCode::OK);
    assert!(dashboard.body.contains("Nothing yet."));
}

#[tokio::test]
async fn test_listings_show_rows() {
    let mut client = signed_in(seeded().await).await;

    let leads = client.get("/leads").await;
    assert_eq!(leads.status, StatusCode::OK);
    assert!(leads.body.contains("Sam Patel"));
    assert!(leads.body.contains("Page 1 of 1"));
    assert!(leads.body.contains("href=\"/leads/export.csv\""));

    let inquiries = client.get("/inquiries").await;
    assert!(inquiries.body.contains("lee@example.com"));

    let responses = client.get("/responses").await;
    assert!(responses.body.contains("1,500"));

    let users = client.get("/users?page=2").await;
    assert_eq!(users.status, StatusCode::OK);
    assert!(users.body.contains("No users on this page."));
}

// =============================================================================
// CSV Export Tests
// =============================================================================

#[tokio::test]
async fn test_export_leads_csv() {
    let mut client = signed_in(seeded().await).await;

    let csv = client.get("/leads/export.csv").await;
    assert_eq!(csv.status, StatusCode::OK);
    assert_eq!(csv.header(header::CONTENT_TYPE), Some("text/csv; charset=utf-8"));
    let disposition = csv.header(header::CONTENT_DISPOSITION).expect("attachment");
    assert!(disposition.starts_with("attachment; filename=\"leads-"));
    assert!(disposition.ends_with(".csv\""));

    let mut lines = csv.body.lines();
    assert_eq!(
        lines.next(),
        Some("id,name,email,phone,source,page_captured,status,created_at")
    );
    let row = lines.next().expect("one lead row");
    assert!(row.contains(",Sam Patel,sam@example.com,720-555-0101,inactivity_popup,/,new,"));
    assert_eq!(lines.next(), None);
}

#[tokio::test]
async fn test_export_quotes_commas() {
    let mut client = signed_in(seeded().await).await;

    let csv = client.get("/inquiries/export.csv").await;
    assert_eq!(csv.status, StatusCode::OK);
    assert!(csv.body.contains(",\"Lee, Park\",lee@example.com,"));
    assert_eq!(csv.body.lines().count(), 3);
}

#[tokio::test]
async fn test_export_empty_page_is_no_content() {
    let mut client = signed_in(seeded().await).await;

    let empty = client.get("/users/export.csv?page=2").await;
    assert_eq!(empty.status, StatusCode::NO_CONTENT);
    assert!(empty.body.is_empty());
    assert!(empty.header(header::CONTENT_DISPOSITION).is_none());
}

#[tokio::test]
async fn test_export_unknown_entity() {
    let mut client = signed_in(MemoryAdminStore::new()).await;
    let response = client.get("/orders/export.csv").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let mut client = TestClient::new(admin_app(MemoryAdminStore::new()));
    assert_eq!(client.get("/health").await.body, "ok");
    assert_eq!(client.get("/health/ready").await.status, StatusCode::OK);
}
