//! Lead-capture modal trigger policy.
//!
//! The results page script opens the modal when the first threshold of
//! the [`CapturePolicy`] it is handed is crossed. A session that has
//! already seen the modal is handed no policy.

use std::time::Duration;

use serde::Serialize;

/// Thresholds for opening the capture modal. The first one crossed wins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturePolicy {
    /// Fraction of the scrollable height that must be passed.
    pub scroll_ratio: f64,
    /// Listing cards clicked.
    pub listing_clicks: u32,
    /// Time on the page.
    #[serde(rename = "fallbackAfterMs", serialize_with = "as_millis")]
    pub fallback_after: Duration,
}

impl CapturePolicy {
    /// The policy to hand the results page, or `None` once this session
    /// has seen the modal.
    #[must_use]
    pub fn offer(self, already_shown: bool) -> Option<Self> {
        (!already_shown).then_some(self)
    }
}

impl Default for CapturePolicy {
    fn default() -> Self {
        Self {
            scroll_ratio: 0.3,
            listing_clicks: 3,
            fallback_after: Duration::from_secs(30),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::trivially_copy_pass_by_ref)]
fn as_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let policy = CapturePolicy::default();
        assert!((policy.scroll_ratio - 0.3).abs() < f64::EPSILON);
        assert_eq!(policy.listing_clicks, 3);
        assert_eq!(policy.fallback_after, Duration::from_secs(30));
    }

    #[test]
    fn test_offered_once_per_session() {
        let policy = CapturePolicy::default();
        assert_eq!(policy.offer(false), Some(policy));
        assert_eq!(policy.offer(true), None);
    }

    #[test]
    fn test_policy_serializes_for_the_page() {
        let json = serde_json::to_value(CapturePolicy::default()).ok();
        assert_eq!(
            json,
            Some(serde_json::json!({
                "scrollRatio": 0.3,
                "listingClicks": 3,
                "fallbackAfterMs": 30000
            }))
        );
    }
}
