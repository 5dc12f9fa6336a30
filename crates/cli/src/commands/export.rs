//! CSV export command.
//!
//! Writes the same rows the admin listing shows for the page. An empty
//! page writes no file.

use std::path::PathBuf;

use chrono::Utc;

use lease_small_space_admin::db::{Entity, Page, PgAdminStore};
use lease_small_space_admin::export::{export_page, file_name};

use super::{CliError, connect};

/// Export `page` of `entity` to `out`, or to the default file name.
pub async fn run(entity: &str, page: u32, out: Option<PathBuf>) -> Result<(), CliError> {
    let entity =
        Entity::from_slug(entity).ok_or_else(|| CliError::UnknownEntity(entity.to_owned()))?;
    let page = Page::new(page);

    let store = PgAdminStore::new(connect().await?);
    let Some(csv) = export_page(&store, entity, page).await? else {
        tracing::info!(
            entity = entity.slug(),
            page = page.number(),
            "Nothing to export"
        );
        return Ok(());
    };

    let path = out.unwrap_or_else(|| PathBuf::from(file_name(entity, page, Utc::now().date_naive())));
    tokio::fs::write(&path, csv).await?;
    tracing::info!(path = %path.display(), "CSV written");
    Ok(())
}
