//! Read access to the LeaseSmallSpace tables.
//!
//! The admin never writes: rows come from the public site. Everything is
//! read newest first, a page at a time.
//!
//! Routes go through [`AdminStore`], implemented for Postgres and in
//! memory.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub mod memory;
mod store;

pub use memory::MemoryAdminStore;
pub use store::{AdminStore, PgAdminStore};

/// Rows per listing page.
pub const PAGE_SIZE: u32 = 25;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// The tables the admin lists and exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Leads,
    Inquiries,
    Responses,
    Users,
}

impl Entity {
    pub const ALL: [Self; 4] = [Self::Leads, Self::Inquiries, Self::Responses, Self::Users];

    /// Path segment, e.g. `leads` in `/leads/export.csv`.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Leads => "leads",
            Self::Inquiries => "inquiries",
            Self::Responses => "responses",
            Self::Users => "users",
        }
    }

    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.slug() == slug)
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Leads => "Leads",
            Self::Inquiries => "Inquiries",
            Self::Responses => "Questionnaire Responses",
            Self::Users => "Users",
        }
    }

    const fn table(self) -> &'static str {
        match self {
            Self::Leads => "lss.lead",
            Self::Inquiries => "lss.inquiry",
            Self::Responses => "lss.questionnaire_response",
            Self::Users => "lss.user",
        }
    }
}

/// A 1-based page of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u32,
    size: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Page {
    /// Page `number` of [`PAGE_SIZE`] rows. Page 0 is treated as page 1.
    #[must_use]
    pub fn new(number: u32) -> Self {
        Self {
            number: number.max(1),
            size: PAGE_SIZE,
        }
    }

    /// The newest `size` rows.
    #[must_use]
    pub const fn first(size: u32) -> Self {
        Self { number: 1, size }
    }

    #[must_use]
    pub const fn number(self) -> u32 {
        self.number
    }

    #[must_use]
    pub const fn size(self) -> u32 {
        self.size
    }

    #[must_use]
    pub fn offset(self) -> u64 {
        u64::from(self.number - 1) * u64::from(self.size)
    }

    /// Pages needed for `total` rows; at least one.
    #[must_use]
    pub fn count_for(self, total: u64) -> u32 {
        let pages = total.div_ceil(u64::from(self.size.max(1))).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// The rows of this page out of an already sorted slice.
    pub(crate) fn slice<T: Clone>(self, rows: &[T]) -> Vec<T> {
        let start = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let size = usize::try_from(self.size).unwrap_or(usize::MAX);
        rows.iter()
            .skip(start)
            .take(size)
            .cloned()
            .collect()
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_zero_is_first_page() {
        assert_eq!(Page::new(0), Page::new(1));
        assert_eq!(Page::new(0).offset(), 0);
        assert_eq!(Page::new(3).offset(), 50);
    }

    #[test]
    fn test_count_for() {
        let page = Page::default();
        assert_eq!(page.count_for(0), 1);
        assert_eq!(page.count_for(25), 1);
        assert_eq!(page.count_for(26), 2);
    }

    #[test]
    fn test_slice() {
        let rows: Vec<u32> = (0..60).collect();
        assert_eq!(Page::new(3).slice(&rows), (50..60).collect::<Vec<_>>());
        assert!(Page::new(4).slice(&rows).is_empty());
        assert_eq!(Page::first(3).slice(&rows), vec![0, 1, 2]);
    }

    #[test]
    fn test_entity_slugs() {
        for entity in Entity::ALL {
            assert_eq!(Entity::from_slug(entity.slug()), Some(entity));
        }
        assert_eq!(Entity::from_slug("orders"), None);
    }
}
