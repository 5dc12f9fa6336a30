//! Landing page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use lease_small_space_core::analytics::TrackedEvent;
use lease_small_space_core::questionnaire::options::{Choice, LOCATIONS, SPACE_TYPES};

use super::PageMeta;
use crate::filters;
use crate::middleware::Visitor;
use crate::state::AppState;

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub meta: PageMeta,
    pub space_types: &'static [Choice],
    pub popular_locations: Vec<&'static str>,
}

/// Display the landing page.
#[instrument(skip(state, visitor))]
pub async fn home(State(state): State<AppState>, visitor: Visitor) -> HomeTemplate {
    state
        .analytics()
        .track(TrackedEvent::page_view("/", "Home"), &visitor.context);

    HomeTemplate {
        meta: PageMeta::new(
            state.config(),
            "Small Commercial Space in Colorado",
            "Find warehouse, industrial, shop and mixed-use space under 10,000 sq ft.",
        ),
        space_types: SPACE_TYPES,
        popular_locations: LOCATIONS.iter().take(6).map(|c| c.title).collect(),
    }
}
