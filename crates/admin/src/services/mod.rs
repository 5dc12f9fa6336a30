//! Business logic services for admin.
//!
//! # Services
//!
//! - `auth` - access-token login
//! - `dashboard` - counts and the recent-activity feed

pub mod auth;
pub mod dashboard;

pub use auth::{AccessToken, AdminAuthError, AdminAuthService};
pub use dashboard::{Dashboard, DashboardStats, RecentItem, RecentKind, load_dashboard, merge_recent};
