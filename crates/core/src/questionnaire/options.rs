//! Choice catalogues offered on the questionnaire steps.
//!
//! Location also accepts free text, so [`label_for`] falls back to the
//! raw value for anything not listed here.

/// A selectable answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub id: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
}

const fn choice(id: &'static str, title: &'static str, subtitle: &'static str) -> Choice {
    Choice {
        id,
        title,
        subtitle,
    }
}

pub const LEASE_OR_BUY: &[Choice] = &[
    choice("lease", "Lease", "Flexible terms, lower upfront cost"),
    choice("buy", "Buy", "Build equity in your own space"),
];

pub const SPACE_TYPES: &[Choice] = &[
    choice("warehouse", "Warehouse", "Storage, distribution, logistics"),
    choice("industrial", "Industrial", "Manufacturing and fabrication"),
    choice("shop", "Shop", "Contractor and service bays"),
    choice("mixed-use", "Mixed-use", "Office plus flex space"),
];

pub const TIMELINES: &[Choice] = &[
    choice("asap", "ASAP", "Within 1-2 weeks"),
    choice("30days", "Within 30 Days", "This month"),
    choice("60days", "1-2 Months", "Next quarter"),
    choice("flexible", "Just Exploring", "No rush"),
];

/// Colorado markets; the first two are shown as popular.
pub const LOCATIONS: &[Choice] = &[
    choice("denver", "Denver", "Popular"),
    choice("arvada", "Arvada", "Popular"),
    choice("aurora", "Aurora", ""),
    choice("lakewood", "Lakewood", ""),
    choice("thornton", "Thornton", ""),
    choice("westminster", "Westminster", ""),
    choice("greeley", "Greeley", ""),
    choice("centennial", "Centennial", ""),
    choice("highlands-ranch", "Highlands Ranch", ""),
    choice("longmont", "Longmont", ""),
    choice("castle-rock", "Castle Rock", ""),
    choice("loveland", "Loveland", ""),
    choice("broomfield", "Broomfield", ""),
    choice("commerce-city", "Commerce City", ""),
    choice("parker", "Parker", ""),
];

/// Building features offered as results filters.
pub const FEATURES: &[Choice] = &[
    choice("dock-high", "Dock-High Door", ""),
    choice("drive-in", "Drive-In Door", ""),
    choice("office", "Office Space", ""),
    choice("power", "Heavy Power", ""),
];

/// Size presets shown as quick picks on the size step.
pub const SIZE_PRESETS: &[u32] = &[500, 1000, 2000, 3500, 5000, 10_000];

/// Display label for an answer id, or the value itself when it is not a
/// catalogued id.
#[must_use]
pub fn label_for<'a>(catalogue: &[Choice], value: &'a str) -> &'a str {
    catalogue
        .iter()
        .find(|c| c.id == value)
        .map_or(value, |c| c.title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_for_known_and_free_text() {
        assert_eq!(label_for(TIMELINES, "30days"), "Within 30 Days");
        assert_eq!(label_for(LOCATIONS, "highlands-ranch"), "Highlands Ranch");
        assert_eq!(label_for(LOCATIONS, "Fort Collins"), "Fort Collins");
    }

    #[test]
    fn test_ids_are_unique() {
        for catalogue in [LEASE_OR_BUY, SPACE_TYPES, TIMELINES, LOCATIONS, FEATURES] {
            let mut ids: Vec<_> = catalogue.iter().map(|c| c.id).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), catalogue.len());
        }
    }
}
