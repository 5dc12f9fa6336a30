//! Database operations for the site.
//!
//! # Schema: `lss`
//!
//! ## Tables
//!
//! - `user` - Prospects, unique by email
//! - `inquiry` - One row per contact event
//! - `questionnaire_response` - Structured questionnaire answers
//! - `lead` - Capture-modal submissions
//! - `analytics_event` - Append-only event log
//! - `site_session` - Tower-sessions storage
//!
//! # Migrations
//!
//! Migrations are stored in `crates/site/migrations/` and run via:
//! ```bash
//! cargo run -p lease-small-space-cli -- migrate
//! ```
//!
//! Handlers never talk to the pool directly; they go through [`LeadStore`],
//! which has a Postgres and an in-memory implementation.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

mod events;
mod inquiries;
mod leads;
pub mod memory;
mod responses;
mod store;
mod users;

pub use events::EventRepository;
pub use inquiries::InquiryRepository;
pub use leads::LeadRepository;
pub use memory::MemoryLeadStore;
pub use responses::ResponseRepository;
pub use store::{LeadStore, PgLeadStore};
pub use users::UserRepository;

/// Errors returned by store operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("conflict: {0}")]
    Conflict(String),
    /// Raised by the in-memory store when told to fail.
    #[error("store unavailable: {0}")]
    Unavailable(String),
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

/// Convert a requested size to an `INTEGER` column value.
pub(crate) fn sqft_column(value: u32) -> Result<i32, RepositoryError> {
    i32::try_from(value)
        .map_err(|_| RepositoryError::Conflict(format!("size {value} is out of range")))
}
