//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::db::LeadStore;
use crate::services::{AnalyticsSink, Notifier, SubmissionPipeline};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    store: Arc<dyn LeadStore>,
    pipeline: SubmissionPipeline,
    notifier: Notifier,
    analytics: AnalyticsSink,
}

impl AppState {
    /// Wire the services around a store.
    #[must_use]
    pub fn new(
        config: SiteConfig,
        store: Arc<dyn LeadStore>,
        notifier: Notifier,
        analytics: AnalyticsSink,
    ) -> Self {
        let pipeline = SubmissionPipeline::new(Arc::clone(&store), notifier.clone());
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                pipeline,
                notifier,
                analytics,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn store(&self) -> &dyn LeadStore {
        self.inner.store.as_ref()
    }

    #[must_use]
    pub fn pipeline(&self) -> &SubmissionPipeline {
        &self.inner.pipeline
    }

    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }

    #[must_use]
    pub fn analytics(&self) -> &AnalyticsSink {
        &self.inner.analytics
    }
}
