//! Core types for LeaseSmallSpace.
//!
//! Type-safe wrappers for ids, contact emails, statuses and the persisted
//! records shared by the site and admin binaries.

pub mod email;
pub mod id;
pub mod records;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use records::*;
pub use status::*;
