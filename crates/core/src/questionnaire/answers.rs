//! The answer set collected across the questionnaire.

use serde::{Deserialize, Serialize};

use super::Step;

/// Smallest space the brokerage will search for.
pub const MIN_SIZE_SQFT: u32 = 500;

/// Largest size accepted; keeps the stored range inside an `INTEGER` column.
pub const MAX_SIZE_SQFT: u32 = 1_000_000;

/// Size pre-selected on the size step.
pub const DEFAULT_SIZE_SQFT: u32 = 2000;

/// Everything a visitor has answered so far.
///
/// Serialized with camelCase keys; this is both the draft format and the
/// raw `responses` blob stored with a completed questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Answers {
    pub lease_or_buy: String,
    pub space_type: String,
    pub size: u32,
    pub location: String,
    pub timeline: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub sms_consent: bool,
}

impl Default for Answers {
    fn default() -> Self {
        Self {
            lease_or_buy: String::new(),
            space_type: String::new(),
            size: DEFAULT_SIZE_SQFT,
            location: String::new(),
            timeline: String::new(),
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            sms_consent: true,
        }
    }
}

impl Answers {
    /// Apply a single field update.
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::LeaseOrBuy(v) => self.lease_or_buy = v,
            FieldUpdate::SpaceType(v) => self.space_type = v,
            FieldUpdate::Size(v) => self.size = v,
            FieldUpdate::Location(v) => self.location = v,
            FieldUpdate::Timeline(v) => self.timeline = v,
            FieldUpdate::Name(v) => self.name = v,
            FieldUpdate::Email(v) => self.email = v,
            FieldUpdate::Phone(v) => self.phone = v,
            FieldUpdate::SmsConsent(v) => self.sms_consent = v,
        }
    }

    /// Search size range derived from the requested size.
    #[must_use]
    pub fn size_range(&self) -> SizeRange {
        SizeRange::around(self.size)
    }
}

/// A change to one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    LeaseOrBuy(String),
    SpaceType(String),
    Size(u32),
    Location(String),
    Timeline(String),
    Name(String),
    Email(String),
    Phone(String),
    SmsConsent(bool),
}

impl FieldUpdate {
    /// The answer key, as serialized in [`Answers`].
    #[must_use]
    pub const fn field_name(&self) -> &'static str {
        match self {
            Self::LeaseOrBuy(_) => "leaseOrBuy",
            Self::SpaceType(_) => "spaceType",
            Self::Size(_) => "size",
            Self::Location(_) => "location",
            Self::Timeline(_) => "timeline",
            Self::Name(_) => "name",
            Self::Email(_) => "email",
            Self::Phone(_) => "phone",
            Self::SmsConsent(_) => "smsConsent",
        }
    }

    /// The step that asks for this field.
    #[must_use]
    pub const fn step(&self) -> Step {
        match self {
            Self::LeaseOrBuy(_) => Step::LeaseOrBuy,
            Self::SpaceType(_) => Step::SpaceType,
            Self::Size(_) => Step::Size,
            Self::Location(_) => Step::Location,
            Self::Timeline(_) => Step::Timeline,
            Self::Name(_) | Self::Email(_) | Self::Phone(_) | Self::SmsConsent(_) => Step::Contact,
        }
    }

    /// Value reported to analytics. Contact details are withheld.
    #[must_use]
    pub fn analytics_value(&self) -> serde_json::Value {
        match self {
            Self::LeaseOrBuy(v) | Self::SpaceType(v) | Self::Location(v) | Self::Timeline(v) => {
                serde_json::Value::from(v.as_str())
            }
            Self::Size(v) => serde_json::Value::from(*v),
            Self::SmsConsent(v) => serde_json::Value::from(*v),
            Self::Name(_) | Self::Email(_) | Self::Phone(_) => serde_json::Value::Null,
        }
    }
}

/// Square-footage window searched for a requested size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: u32,
    pub max: u32,
}

impl SizeRange {
    /// `[max(500, size - 500), size + 1000]`.
    #[must_use]
    pub const fn around(size: u32) -> Self {
        let lower = size.saturating_sub(500);
        Self {
            min: if lower < MIN_SIZE_SQFT {
                MIN_SIZE_SQFT
            } else {
                lower
            },
            max: size.saturating_add(1000),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let answers = Answers::default();
        assert_eq!(answers.size, 2000);
        assert!(answers.sms_consent);
        assert!(answers.email.is_empty());
    }

    #[test]
    fn test_size_range() {
        assert_eq!(SizeRange::around(2000), SizeRange { min: 1500, max: 3000 });
        assert_eq!(SizeRange::around(300), SizeRange { min: 500, max: 1300 });
        assert_eq!(SizeRange::around(900), SizeRange { min: 500, max: 1900 });
        assert_eq!(SizeRange::around(1000), SizeRange { min: 500, max: 2000 });
        assert_eq!(SizeRange::around(0), SizeRange { min: 500, max: 1000 });
    }

    #[test]
    fn test_partial_draft_fills_defaults() {
        let answers: Answers =
            serde_json::from_str(r#"{"leaseOrBuy":"lease","spaceType":"warehouse"}"#).unwrap();
        assert_eq!(answers.lease_or_buy, "lease");
        assert_eq!(answers.size, DEFAULT_SIZE_SQFT);
        assert!(answers.sms_consent);
    }

    #[test]
    fn test_apply_and_field_names() {
        let mut answers = Answers::default();
        let update = FieldUpdate::Location("Arvada".to_owned());
        assert_eq!(update.field_name(), "location");
        assert_eq!(update.step(), Step::Location);
        answers.apply(update);
        assert_eq!(answers.location, "Arvada");
    }

    #[test]
    fn test_contact_values_are_not_reported() {
        let update = FieldUpdate::Email("dana@example.com".to_owned());
        assert!(update.analytics_value().is_null());
        assert_eq!(FieldUpdate::Size(1200).analytics_value(), 1200);
    }
}
