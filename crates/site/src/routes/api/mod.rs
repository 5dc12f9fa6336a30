//! JSON API handlers.

pub mod google_maps;
pub mod lead_capture;
pub mod questionnaire_submit;
