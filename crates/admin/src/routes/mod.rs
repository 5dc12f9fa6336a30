//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//! GET  /health/ready           - Readiness (store reachable)
//!
//! # Auth (single access token)
//! GET  /login                  - Login page
//! POST /login                  - Check the token and sign in
//! POST /logout                 - Sign out
//!
//! # Dashboard
//! GET  /                       - Counts and recent activity
//!
//! # Listings (newest first, ?page=N)
//! GET  /leads
//! GET  /inquiries
//! GET  /responses
//! GET  /users
//!
//! # Export
//! GET  /{entity}/export.csv    - The listing page as CSV (?page=N)
//! ```

pub mod auth;
pub mod dashboard;
pub mod export;
pub mod listings;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create all routes for admin.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/leads", get(listings::leads))
        .route("/inquiries", get(listings::inquiries))
        .route("/responses", get(listings::responses))
        .route("/users", get(listings::users))
        .route("/{entity}/export.csv", get(export::download))
}
