//! The six questionnaire steps and their completion guards.

use serde::{Deserialize, Serialize};

use super::{Answers, MAX_SIZE_SQFT, MIN_SIZE_SQFT};

/// One screen of the questionnaire, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    LeaseOrBuy,
    SpaceType,
    Size,
    Location,
    Timeline,
    Contact,
}

impl Step {
    /// All steps in order.
    pub const ALL: [Self; 6] = [
        Self::LeaseOrBuy,
        Self::SpaceType,
        Self::Size,
        Self::Location,
        Self::Timeline,
        Self::Contact,
    ];

    /// Number of steps.
    pub const COUNT: u8 = 6;

    /// 1-based position.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::LeaseOrBuy => 1,
            Self::SpaceType => 2,
            Self::Size => 3,
            Self::Location => 4,
            Self::Timeline => 5,
            Self::Contact => 6,
        }
    }

    /// Step for a 1-based position, if in range.
    #[must_use]
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::LeaseOrBuy),
            2 => Some(Self::SpaceType),
            3 => Some(Self::Size),
            4 => Some(Self::Location),
            5 => Some(Self::Timeline),
            6 => Some(Self::Contact),
            _ => None,
        }
    }

    /// Name used in analytics payloads.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LeaseOrBuy => "lease_or_buy",
            Self::SpaceType => "space_type",
            Self::Size => "size",
            Self::Location => "location",
            Self::Timeline => "timeline",
            Self::Contact => "contact",
        }
    }

    #[must_use]
    pub const fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }

    #[must_use]
    pub const fn is_first(self) -> bool {
        matches!(self, Self::LeaseOrBuy)
    }

    #[must_use]
    pub const fn is_last(self) -> bool {
        matches!(self, Self::Contact)
    }

    /// Percentage of the questionnaire reached when this step is shown,
    /// rounded to the nearest whole number.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn progress_percent(self) -> u8 {
        let n = self.number() as u16;
        let total = Self::COUNT as u16;
        // at most 100
        ((n * 100 + total / 2) / total) as u8
    }

    /// Whether the answers satisfy this step's guard, i.e. whether the
    /// visitor may move forward from it.
    #[must_use]
    pub fn is_complete(self, answers: &Answers) -> bool {
        match self {
            Self::LeaseOrBuy => filled(&answers.lease_or_buy),
            Self::SpaceType => filled(&answers.space_type),
            Self::Size => (MIN_SIZE_SQFT..=MAX_SIZE_SQFT).contains(&answers.size),
            Self::Location => filled(&answers.location),
            Self::Timeline => filled(&answers.timeline),
            Self::Contact => {
                filled(&answers.name) && filled(&answers.email) && filled(&answers.phone)
            }
        }
    }

    /// Message shown when the visitor tries to move on from an incomplete step.
    #[must_use]
    pub const fn requirement(self) -> &'static str {
        match self {
            Self::LeaseOrBuy => "Choose whether you want to lease or buy.",
            Self::SpaceType => "Choose the type of space you need.",
            Self::Size => "Space size must be at least 500 sq ft and at most 1,000,000 sq ft.",
            Self::Location => "Tell us where you are looking.",
            Self::Timeline => "Choose when you need to move.",
            Self::Contact => "Name, email and phone are required.",
        }
    }
}

fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_round_trip() {
        for step in Step::ALL {
            assert_eq!(Step::from_number(step.number()), Some(step));
        }
        assert_eq!(Step::from_number(0), None);
        assert_eq!(Step::from_number(7), None);
    }

    #[test]
    fn test_neighbours() {
        assert_eq!(Step::LeaseOrBuy.previous(), None);
        assert_eq!(Step::LeaseOrBuy.next(), Some(Step::SpaceType));
        assert_eq!(Step::Contact.next(), None);
        assert_eq!(Step::Contact.previous(), Some(Step::Timeline));
    }

    #[test]
    fn test_progress_percent() {
        let progress: Vec<u8> = Step::ALL.iter().map(|s| s.progress_percent()).collect();
        assert_eq!(progress, vec![17, 33, 50, 67, 83, 100]);
    }

    #[test]
    fn test_empty_answers_only_pass_size() {
        let answers = Answers::default();
        for step in Step::ALL {
            assert_eq!(step.is_complete(&answers), step == Step::Size, "{step}");
        }
    }

    #[test]
    fn test_whitespace_is_not_an_answer() {
        let answers = Answers {
            lease_or_buy: "   ".to_owned(),
            location: "\t".to_owned(),
            ..Answers::default()
        };
        assert!(!Step::LeaseOrBuy.is_complete(&answers));
        assert!(!Step::Location.is_complete(&answers));
    }

    #[test]
    fn test_size_boundary() {
        let mut answers = Answers {
            size: 499,
            ..Answers::default()
        };
        assert!(!Step::Size.is_complete(&answers));
        answers.size = 500;
        assert!(Step::Size.is_complete(&answers));
        answers.size = 1_000_000;
        assert!(Step::Size.is_complete(&answers));
        answers.size = 3_000_000_000;
        assert!(!Step::Size.is_complete(&answers));
    }

    #[test]
    fn test_contact_needs_all_three() {
        let mut answers = Answers {
            name: "Dana".to_owned(),
            email: "dana@example.com".to_owned(),
            ..Answers::default()
        };
        assert!(!Step::Contact.is_complete(&answers));
        answers.phone = "303-555-0100".to_owned();
        assert!(Step::Contact.is_complete(&answers));
        answers.name.clear();
        assert!(!Step::Contact.is_complete(&answers));
    }
}
