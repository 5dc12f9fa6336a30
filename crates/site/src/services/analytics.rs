//! Non-blocking analytics event writer.
//!
//! Events are queued on an unbounded channel and written by a single
//! background task. Tracking never waits on the store and never fails.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use lease_small_space_core::analytics::{AnalyticsEvent, EventContext, TrackedEvent};

use crate::db::LeadStore;

#[derive(Debug, Clone)]
pub struct AnalyticsSink {
    tx: Option<mpsc::UnboundedSender<AnalyticsEvent>>,
}

impl AnalyticsSink {
    /// Start the writer task. Must be called inside a Tokio runtime.
    #[must_use]
    pub fn spawn(store: Arc<dyn LeadStore>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<AnalyticsEvent>();
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                let name = event.event_name;
                if let Err(e) = store.record_event(event).await {
                    warn!(event = %name, error = %e, "Failed to record analytics event");
                }
            }
            debug!("analytics writer stopped");
        });
        Self { tx: Some(tx) }
    }

    /// A sink that drops every event.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { tx: None }
    }

    /// Queue an event with its request context.
    pub fn track(&self, event: TrackedEvent, context: &EventContext) {
        let Some(tx) = &self.tx else {
            return;
        };
        let name = event.name;
        if tx.send(AnalyticsEvent::new(event, context)).is_err() {
            debug!(event = %name, "analytics writer gone; event dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use lease_small_space_core::analytics::EventName;
    use lease_small_space_core::questionnaire::Step;

    use super::*;
    use crate::db::MemoryLeadStore;

    #[tokio::test]
    async fn test_events_reach_the_store() {
        let store = Arc::new(MemoryLeadStore::new());
        let sink = AnalyticsSink::spawn(store.clone());
        let context = EventContext {
            session_id: Some("s-42".to_string()),
            ..EventContext::default()
        };

        sink.track(TrackedEvent::step_viewed(Step::Size), &context);

        for _ in 0..50 {
            if !store.events().await.is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        let events = store.events().await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_name, EventName::QuestionnaireStepViewed);
        assert_eq!(events[0].session_id.as_deref(), Some("s-42"));
    }

    #[test]
    fn test_disabled_sink_drops_events() {
        AnalyticsSink::disabled().track(
            TrackedEvent::page_view("/", "Home"),
            &EventContext::default(),
        );
    }
}
