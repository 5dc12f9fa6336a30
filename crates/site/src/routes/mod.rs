//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                         - Landing page
//! GET  /questionnaire            - Current questionnaire step
//! POST /questionnaire            - Answer a step and move next/back
//! GET  /results                  - Matched listings and capture modal
//! POST /results/capture-shown    - Record that the capture modal opened
//!
//! # JSON API
//! POST /api/lead-capture         - Store a capture-modal lead
//! POST /api/questionnaire-submit - Store a complete questionnaire
//! GET  /api/google-maps-script   - Maps loader URL for the browser
//! ```

pub mod api;
pub mod home;
pub mod questionnaire;
pub mod results;

use axum::{
    Router,
    routing::{get, post},
};

use crate::config::SiteConfig;
use crate::state::AppState;

/// Values every page layout needs.
#[derive(Debug, Clone)]
pub struct PageMeta {
    pub title: String,
    pub description: &'static str,
    pub ga4_measurement_id: Option<String>,
}

impl PageMeta {
    #[must_use]
    pub fn new(config: &SiteConfig, title: &str, description: &'static str) -> Self {
        Self {
            title: format!("{title} | LeaseSmallSpace"),
            description,
            ga4_measurement_id: config.analytics.ga4_measurement_id.clone(),
        }
    }
}

/// Create the JSON API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/lead-capture", post(api::lead_capture::capture))
        .route(
            "/questionnaire-submit",
            post(api::questionnaire_submit::submit),
        )
        .route("/google-maps-script", get(api::google_maps::script))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route(
            "/questionnaire",
            get(questionnaire::show).post(questionnaire::advance),
        )
        .route("/results", get(results::show))
        .route("/results/capture-shown", post(results::capture_shown))
        .nest("/api", api_routes())
}
