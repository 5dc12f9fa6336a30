//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use chrono::Utc;
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::services::{DashboardStats, RecentItem, load_dashboard};
use crate::state::AppState;

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub stats: DashboardStats,
    pub recent: Vec<RecentItem>,
}

/// Display the dashboard.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
) -> Result<DashboardTemplate, AppError> {
    let dashboard = load_dashboard(state.store(), Utc::now()).await?;
    Ok(DashboardTemplate {
        stats: dashboard.stats,
        recent: dashboard.recent,
    })
}
