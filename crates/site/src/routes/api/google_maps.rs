//! Google Maps loader URL.
//!
//! The browser key is kept server-side and handed to the results page on
//! request, so it never appears in the HTML.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::config::google_maps_script_url;
use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptResponse {
    pub script_url: String,
}

/// Return the Maps JavaScript loader URL.
///
/// # Errors
///
/// Returns 500 when no Maps key is configured.
pub async fn script(State(state): State<AppState>) -> Result<Json<ScriptResponse>> {
    let key = state
        .config()
        .google_maps_api_key
        .as_ref()
        .ok_or(AppError::NotConfigured("Google Maps API key not configured"))?;
    Ok(Json(ScriptResponse {
        script_url: google_maps_script_url(key),
    }))
}
