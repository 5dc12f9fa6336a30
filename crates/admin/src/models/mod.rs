//! Types the admin keeps outside the database.

pub mod session;

pub use session::{CurrentAdmin, keys as session_keys};
