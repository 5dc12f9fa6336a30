//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AdminConfig;
use crate::db::AdminStore;
use crate::services::AccessToken;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    store: Arc<dyn AdminStore>,
    access_token: AccessToken,
}

impl AppState {
    #[must_use]
    pub fn new(config: AdminConfig, store: Arc<dyn AdminStore>) -> Self {
        let access_token = AccessToken::new(config.access_token.clone());
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                access_token,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn store(&self) -> &dyn AdminStore {
        self.inner.store.as_ref()
    }

    #[must_use]
    pub fn access_token(&self) -> &AccessToken {
        &self.inner.access_token
    }
}
