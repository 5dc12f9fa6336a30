//! LeaseSmallSpace Core - shared types and questionnaire logic.
//!
//! Used by every LeaseSmallSpace component:
//! - `site` - public questionnaire, results and lead-capture endpoints
//! - `admin` - internal dashboard and CSV export
//! - `cli` - migrations and exports
//!
//! # Architecture
//!
//! No I/O lives here: no database access, no HTTP clients, no sessions.
//! The questionnaire is a pure state machine whose effects are carried
//! out by the site crate.
//!
//! # Modules
//!
//! - [`types`] - ids, emails, statuses and persisted records
//! - [`questionnaire`] - steps, guards, answers and the wizard reducer
//! - [`listings`] - the showcase listings on the results page
//! - [`capture`] - when the results page opens the lead-capture modal
//! - [`analytics`] - event names and payloads

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod analytics;
pub mod capture;
pub mod listings;
pub mod questionnaire;
pub mod types;

pub use types::*;
