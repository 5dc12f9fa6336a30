//! Results page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, RawQuery, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::{instrument, warn};

use lease_small_space_core::analytics::TrackedEvent;
use lease_small_space_core::capture::CapturePolicy;
use lease_small_space_core::listings::{self, Listing};
use lease_small_space_core::questionnaire::options::{
    Choice, FEATURES, LOCATIONS, SPACE_TYPES, label_for,
};
use lease_small_space_core::questionnaire::{MAX_SIZE_SQFT, MIN_SIZE_SQFT};

use super::PageMeta;
use crate::filters;
use crate::middleware::Visitor;
use crate::state::AppState;

/// Session key set once the capture modal has opened.
pub const CAPTURE_SHOWN_KEY: &str = "lss_capture_shown";

const DEFAULT_SIZE: u32 = 2500;
const DEFAULT_LOCATION: &str = "Denver";

/// Query key of one ticked checkbox in the filter panel.
const FEATURE_KEY: &str = "feature";

/// Raw results query. Older links use `zip` and `type`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsParams {
    pub location: Option<String>,
    pub zip: Option<String>,
    pub space_type: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub size: Option<String>,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub features: Option<String>,
    pub user_id: Option<String>,
    pub view: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultsView {
    #[default]
    Map,
    List,
}

/// What the visitor searched for, normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsSearch {
    pub location: String,
    pub space_type: String,
    pub size: u32,
    pub budget: u32,
    pub timeline: String,
    pub features: Vec<String>,
    pub view: ResultsView,
    /// Carried across view switches and filter edits.
    pub user_id: Option<String>,
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn parse_number(value: Option<&String>, default: u32) -> u32 {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl From<&ResultsParams> for ResultsSearch {
    fn from(params: &ResultsParams) -> Self {
        Self {
            location: non_blank(params.location.as_ref())
                .or_else(|| non_blank(params.zip.as_ref()))
                .unwrap_or_default(),
            space_type: non_blank(params.space_type.as_ref())
                .or_else(|| non_blank(params.kind.as_ref()))
                .unwrap_or_default(),
            size: parse_number(params.size.as_ref(), DEFAULT_SIZE),
            budget: parse_number(params.budget.as_ref(), 0),
            timeline: non_blank(params.timeline.as_ref()).unwrap_or_default(),
            features: params
                .features
                .as_deref()
                .map(|f| {
                    f.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_owned)
                        .collect()
                })
                .unwrap_or_default(),
            view: match params.view.as_deref() {
                Some("list") => ResultsView::List,
                _ => ResultsView::Map,
            },
            user_id: non_blank(params.user_id.as_ref()),
        }
    }
}

impl ResultsSearch {
    /// Add features ticked in the filter panel, sent as repeated
    /// `feature` keys.
    #[must_use]
    pub fn with_checked_features(mut self, raw_query: Option<&str>) -> Self {
        let Some(raw) = raw_query else {
            return self;
        };
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            let value = value.trim();
            if key == FEATURE_KEY && !value.is_empty() && !self.features.iter().any(|f| f == value) {
                self.features.push(value.to_owned());
            }
        }
        self
    }

    /// Headline, e.g. "6 spaces in Arvada".
    #[must_use]
    pub fn headline(&self, count: usize) -> String {
        let place = if self.location.is_empty() {
            DEFAULT_LOCATION
        } else {
            label_for(LOCATIONS, &self.location)
        };
        format!("{count} spaces in {place}")
    }

    #[must_use]
    pub fn type_label(&self) -> &str {
        if self.space_type.is_empty() {
            "All types"
        } else {
            label_for(SPACE_TYPES, &self.space_type)
        }
    }

    /// Query string for the same search in another view.
    fn view_link(&self, view: &str) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        if !self.location.is_empty() {
            query.append_pair("location", &self.location);
        }
        if !self.space_type.is_empty() {
            query.append_pair("spaceType", &self.space_type);
        }
        query.append_pair("size", &self.size.to_string());
        if self.budget > 0 {
            query.append_pair("budget", &self.budget.to_string());
        }
        if !self.timeline.is_empty() {
            query.append_pair("timeline", &self.timeline);
        }
        if !self.features.is_empty() {
            query.append_pair("features", &self.features.join(","));
        }
        if let Some(user_id) = &self.user_id {
            query.append_pair("userId", user_id);
        }
        query.append_pair("view", view);
        format!("/results?{}", query.finish())
    }
}

/// An option in the filter panel.
#[derive(Debug, Clone)]
pub struct FilterOption {
    pub id: &'static str,
    pub title: &'static str,
    pub selected: bool,
}

fn filter_options(catalogue: &'static [Choice], selected: impl Fn(&str) -> bool) -> Vec<FilterOption> {
    catalogue
        .iter()
        .map(|c| FilterOption {
            id: c.id,
            title: c.title,
            selected: selected(c.id),
        })
        .collect()
}

/// Current values for the filter panel's GET form.
#[derive(Debug, Clone)]
pub struct FilterPanel {
    pub location: String,
    pub space_types: Vec<FilterOption>,
    pub size: u32,
    pub min_size: u32,
    pub max_size: u32,
    pub budget: Option<u32>,
    pub timeline: String,
    pub features: Vec<FilterOption>,
    pub view: &'static str,
    pub user_id: Option<String>,
}

impl From<&ResultsSearch> for FilterPanel {
    fn from(search: &ResultsSearch) -> Self {
        Self {
            location: search.location.clone(),
            space_types: filter_options(SPACE_TYPES, |id| id == search.space_type),
            size: search.size,
            min_size: MIN_SIZE_SQFT,
            max_size: MAX_SIZE_SQFT,
            budget: (search.budget > 0).then_some(search.budget),
            timeline: search.timeline.clone(),
            features: filter_options(FEATURES, |id| search.features.iter().any(|f| f == id)),
            view: match search.view {
                ResultsView::Map => "map",
                ResultsView::List => "list",
            },
            user_id: search.user_id.clone(),
        }
    }
}

/// Results page template.
#[derive(Template, WebTemplate)]
#[template(path = "results.html")]
pub struct ResultsTemplate {
    pub meta: PageMeta,
    pub headline: String,
    pub type_label: String,
    pub size: u32,
    pub budget: u32,
    pub feature_count: usize,
    pub show_map: bool,
    pub map_link: String,
    pub list_link: String,
    pub filters: FilterPanel,
    pub listings: &'static [Listing],
    /// JSON for the map pins.
    pub listings_json: String,
    /// Capture thresholds as JSON; `None` once the modal has been shown.
    pub capture_policy_json: Option<String>,
    pub page_path: String,
}

/// Display the matched listings.
#[instrument(skip(state, visitor, params, raw_query))]
pub async fn show(
    State(state): State<AppState>,
    visitor: Visitor,
    Query(params): Query<ResultsParams>,
    RawQuery(raw_query): RawQuery,
) -> ResultsTemplate {
    let search = ResultsSearch::from(&params).with_checked_features(raw_query.as_deref());
    let listings = listings::showcase();

    state.analytics().track(
        TrackedEvent::page_view("/results", "Your Matches"),
        &visitor.context,
    );

    let already_shown = match &visitor.session {
        Some(session) => session
            .get::<bool>(CAPTURE_SHOWN_KEY)
            .await
            .ok()
            .flatten()
            .unwrap_or(false),
        None => false,
    };
    let capture_policy_json = CapturePolicy::default()
        .offer(already_shown)
        .and_then(|policy| serde_json::to_string(&policy).ok());

    ResultsTemplate {
        meta: PageMeta::new(
            state.config(),
            "Your Matches",
            "View your matched commercial spaces ranked by value",
        ),
        headline: search.headline(listings.len()),
        type_label: search.type_label().to_owned(),
        size: search.size,
        budget: search.budget,
        feature_count: search.features.len(),
        show_map: search.view == ResultsView::Map,
        map_link: search.view_link("map"),
        list_link: search.view_link("list"),
        filters: FilterPanel::from(&search),
        listings,
        listings_json: serde_json::to_string(listings).unwrap_or_else(|_| "[]".to_owned()),
        capture_policy_json,
        page_path: visitor.context.page_url.clone().unwrap_or_default(),
    }
}

/// Record that the capture modal opened, so it is not offered again this
/// session.
#[instrument(skip(visitor))]
pub async fn capture_shown(visitor: Visitor) -> StatusCode {
    if let Some(session) = &visitor.session
        && let Err(e) = session.insert(CAPTURE_SHOWN_KEY, true).await
    {
        warn!(error = %e, "Failed to record capture modal in session");
    }
    StatusCode::NO_CONTENT
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> ResultsParams {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();
        let uri: axum::http::Uri = format!("/results?{query}").parse().unwrap();
        let Query(params) = Query::<ResultsParams>::try_from_uri(&uri).unwrap();
        params
    }

    #[test]
    fn test_defaults() {
        let search = ResultsSearch::from(&ResultsParams::default());
        assert_eq!(search.size, 2500);
        assert_eq!(search.budget, 0);
        assert_eq!(search.view, ResultsView::Map);
        assert_eq!(search.headline(6), "6 spaces in Denver");
        assert_eq!(search.type_label(), "All types");
    }

    #[test]
    fn test_aliases() {
        let search = ResultsSearch::from(&params(&[
            ("zip", "80002"),
            ("type", "warehouse"),
            ("features", "loading dock, 3-phase power,"),
            ("view", "list"),
        ]));
        assert_eq!(search.location, "80002");
        assert_eq!(search.type_label(), "Warehouse");
        assert_eq!(search.features, vec!["loading dock", "3-phase power"]);
        assert_eq!(search.view, ResultsView::List);
    }

    #[test]
    fn test_preferred_keys_win() {
        let search = ResultsSearch::from(&params(&[
            ("location", "arvada"),
            ("zip", "80202"),
            ("spaceType", "shop"),
            ("type", "warehouse"),
            ("size", "1200"),
        ]));
        assert_eq!(search.headline(3), "3 spaces in Arvada");
        assert_eq!(search.type_label(), "Shop");
        assert_eq!(search.size, 1200);
    }

    #[test]
    fn test_view_link_keeps_search() {
        let search = ResultsSearch::from(&params(&[("location", "Golden"), ("budget", "3000")]));
        assert_eq!(
            search.view_link("list"),
            "/results?location=Golden&size=2500&budget=3000&view=list"
        );
    }

    #[test]
    fn test_view_link_keeps_user_id() {
        let search = ResultsSearch::from(&params(&[
            ("location", "denver"),
            ("userId", "7f1c2d3e-0000-4000-8000-000000000001"),
        ]));
        assert_eq!(
            search.view_link("map"),
            "/results?location=denver&size=2500&userId=7f1c2d3e-0000-4000-8000-000000000001&view=map"
        );
    }

    #[test]
    fn test_checked_features_merge() {
        let search = ResultsSearch::from(&params(&[("features", "office")]))
            .with_checked_features(Some("feature=dock-high&feature=office&feature=&size=900"));
        assert_eq!(search.features, vec!["office", "dock-high"]);

        let panel = FilterPanel::from(&search);
        let ticked: Vec<_> = panel.features.iter().filter(|f| f.selected).map(|f| f.id).collect();
        assert_eq!(ticked, vec!["dock-high", "office"]);
        assert_eq!(panel.budget, None);
        assert_eq!(panel.view, "map");
    }
}
