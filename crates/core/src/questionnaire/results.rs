//! Query state handed from a completed questionnaire to the results page.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use super::Answers;
use crate::types::UserId;

/// Path of the results page.
pub const RESULTS_PATH: &str = "/results";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsQuery {
    pub space_type: String,
    pub size: u32,
    pub location: String,
    pub timeline: String,
    pub user_id: Option<UserId>,
}

impl ResultsQuery {
    #[must_use]
    pub fn from_answers(answers: &Answers, user_id: Option<UserId>) -> Self {
        Self {
            space_type: answers.space_type.clone(),
            size: answers.size,
            location: answers.location.clone(),
            timeline: answers.timeline.clone(),
            user_id,
        }
    }

    /// Relative URL of the results page, e.g.
    /// `/results?spaceType=warehouse&size=2000&location=Denver&timeline=asap&userId=…`.
    #[must_use]
    pub fn to_path(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query
            .append_pair("spaceType", &self.space_type)
            .append_pair("size", &self.size.to_string())
            .append_pair("location", &self.location)
            .append_pair("timeline", &self.timeline);
        if let Some(user_id) = self.user_id {
            query.append_pair("userId", &user_id.to_string());
        }
        format!("{RESULTS_PATH}?{}", query.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_path_encodes_values() {
        let query = ResultsQuery {
            space_type: "mixed-use".to_owned(),
            size: 1800,
            location: "Castle Rock, CO".to_owned(),
            timeline: "asap".to_owned(),
            user_id: None,
        };
        assert_eq!(
            query.to_path(),
            "/results?spaceType=mixed-use&size=1800&location=Castle+Rock%2C+CO&timeline=asap"
        );
    }

    #[test]
    fn test_to_path_includes_user() {
        let user_id = UserId::new_v4();
        let query = ResultsQuery::from_answers(&Answers::default(), Some(user_id));
        assert!(query.to_path().ends_with(&format!("&userId={user_id}")));
    }
}
