//! CSV download of a listing page.

use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tracing::{info, instrument};

use super::listings::PageQuery;
use crate::db::Entity;
use crate::error::AppError;
use crate::export::{export_page, file_name};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// GET /{entity}/export.csv
///
/// Serializes exactly the rows shown on the same listing page. An empty
/// page is answered with 204 and no file.
#[instrument(skip_all, fields(entity = %entity, page = ?query.page))]
pub async fn download(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Path(entity): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Response, AppError> {
    let entity = Entity::from_slug(&entity)
        .ok_or_else(|| AppError::NotFound(format!("no listing named {entity}")))?;
    let page = query.page();

    let Some(csv) = export_page(state.store(), entity, page).await? else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let name = file_name(entity, page, Utc::now().date_naive());
    info!(entity = entity.slug(), file = %name, "CSV exported");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{name}\""),
            ),
        ],
        csv,
    )
        .into_response())
}
