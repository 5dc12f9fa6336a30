//! Integration tests for LeaseSmallSpace.
//!
//! The site and admin routers run in-process against their in-memory
//! stores and an in-memory session store; requests go through
//! `tower::ServiceExt::oneshot`, so no database or listener is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p lease-small-space-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `site_api` - JSON submission and lead capture endpoints
//! - `site_wizard` - server-rendered questionnaire and results page
//! - `admin` - login, dashboard, listings and CSV export
//! - `notifications` - Slack messages and email contents

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, HeaderValue, Method, Request, StatusCode, header};
use secrecy::SecretString;
use tower::ServiceExt;
use tower_sessions::MemoryStore;

use lease_small_space_admin::config::AdminConfig;
use lease_small_space_admin::db::MemoryAdminStore;
use lease_small_space_site::config::{AnalyticsConfig, SiteConfig};
use lease_small_space_site::db::MemoryLeadStore;
use lease_small_space_site::services::{AnalyticsSink, Notifier};

/// Access token configured for the in-process admin.
pub const ADMIN_TOKEN: &str = "Zq7Lm2Xv9Rt4Kp8Wn3Bc6Hd1Jf5Gs0Ya";

#[must_use]
pub fn site_config() -> SiteConfig {
    SiteConfig {
        database_url: SecretString::from("postgres://localhost/lss_test"),
        host: "127.0.0.1".parse().unwrap(),
        port: 3000,
        base_url: "http://localhost:3000".to_string(),
        admin_base_url: Some("http://localhost:3001".to_string()),
        email: None,
        notification_email: "team@leasesmallspace.com".to_string(),
        slack_webhook_url: None,
        google_maps_api_key: None,
        analytics: AnalyticsConfig::default(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 1.0,
    }
}

#[must_use]
pub fn admin_config() -> AdminConfig {
    AdminConfig {
        database_url: SecretString::from("postgres://localhost/lss_test"),
        host: "127.0.0.1".parse().unwrap(),
        port: 3001,
        base_url: "http://localhost:3001".to_string(),
        access_token: SecretString::from(ADMIN_TOKEN),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 1.0,
    }
}

/// The public site over `store`, with notifications and analytics off.
#[must_use]
pub fn site_app(store: Arc<MemoryLeadStore>) -> Router {
    let state = lease_small_space_site::state::AppState::new(
        site_config(),
        store,
        Notifier::disabled(),
        AnalyticsSink::disabled(),
    );
    lease_small_space_site::build_router(state).layer(
        lease_small_space_site::middleware::create_session_layer(MemoryStore::default(), false),
    )
}

/// The admin over `store`.
#[must_use]
pub fn admin_app(store: MemoryAdminStore) -> Router {
    let state = lease_small_space_admin::state::AppState::new(admin_config(), Arc::new(store));
    lease_small_space_admin::build_router(state).layer(
        lease_small_space_admin::middleware::create_session_layer(MemoryStore::default(), false),
    )
}

/// Admin rows copied out of the site's in-memory store.
pub async fn admin_store_from(site: &MemoryLeadStore) -> MemoryAdminStore {
    MemoryAdminStore::new()
        .with_leads(site.leads().await)
        .with_inquiries(site.inquiries().await)
        .with_responses(site.responses().await)
        .with_users(site.users().await)
}

/// A response with its body read to a string.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    #[must_use]
    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is JSON")
    }
}

/// A client that keeps one session cookie across requests.
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    #[must_use]
    pub const fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None, Body::empty()).await
    }

    pub async fn post_form(&mut self, uri: &str, form: &str) -> TestResponse {
        self.send(
            Method::POST,
            uri,
            Some("application/x-www-form-urlencoded"),
            Body::from(form.to_owned()),
        )
        .await
    }

    pub async fn post_json(&mut self, uri: &str, json: &serde_json::Value) -> TestResponse {
        self.send(
            Method::POST,
            uri,
            Some("application/json"),
            Body::from(json.to_string()),
        )
        .await
    }

    async fn send(
        &mut self,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: Body,
    ) -> TestResponse {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        }

        let response = self
            .app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        // Keep the latest session cookie; login rotates the id.
        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            && let Some(pair) = set_cookie.split(';').next()
        {
            self.cookie = Some(pair.trim().to_owned());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}
