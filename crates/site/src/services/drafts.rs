//! Persistence for in-progress questionnaire answers.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tower_sessions::Session;

use lease_small_space_core::questionnaire::{Answers, DRAFT_KEY};

#[derive(Debug, thiserror::Error)]
#[error("draft storage failed: {0}")]
pub struct DraftError(String);

/// Load, save and clear a visitor's draft.
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// The saved draft, if any. A draft that no longer parses counts as
    /// absent.
    async fn load(&self) -> Result<Option<Answers>, DraftError>;

    async fn save(&self, answers: &Answers) -> Result<(), DraftError>;

    async fn clear(&self) -> Result<(), DraftError>;
}

/// Drafts kept in the visitor's session under [`DRAFT_KEY`].
#[derive(Debug, Clone)]
pub struct SessionDrafts {
    session: Session,
}

impl SessionDrafts {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl DraftStore for SessionDrafts {
    async fn load(&self) -> Result<Option<Answers>, DraftError> {
        match self.session.get::<Answers>(DRAFT_KEY).await {
            Ok(draft) => Ok(draft),
            Err(tower_sessions::session::Error::SerdeJson(e)) => {
                tracing::debug!(error = %e, "Discarding unreadable draft");
                Ok(None)
            }
            Err(e) => Err(DraftError(e.to_string())),
        }
    }

    async fn save(&self, answers: &Answers) -> Result<(), DraftError> {
        self.session
            .insert(DRAFT_KEY, answers)
            .await
            .map_err(|e| DraftError(e.to_string()))
    }

    async fn clear(&self) -> Result<(), DraftError> {
        self.session
            .remove::<serde_json::Value>(DRAFT_KEY)
            .await
            .map(|_| ())
            .map_err(|e| DraftError(e.to_string()))
    }
}

/// Drafts held in process memory.
#[derive(Debug, Default)]
pub struct MemoryDrafts {
    draft: Mutex<Option<Answers>>,
}

impl MemoryDrafts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(answers: Answers) -> Self {
        Self {
            draft: Mutex::new(Some(answers)),
        }
    }
}

#[async_trait]
impl DraftStore for MemoryDrafts {
    async fn load(&self) -> Result<Option<Answers>, DraftError> {
        Ok(self.draft.lock().await.clone())
    }

    async fn save(&self, answers: &Answers) -> Result<(), DraftError> {
        *self.draft.lock().await = Some(answers.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), DraftError> {
        *self.draft.lock().await = None;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_session_drafts_round_trip() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        let drafts = SessionDrafts::new(session);
        assert_eq!(drafts.load().await.unwrap(), None);

        let answers = Answers {
            location: "Golden".to_owned(),
            ..Answers::default()
        };
        drafts.save(&answers).await.unwrap();
        assert_eq!(drafts.load().await.unwrap(), Some(answers));

        drafts.clear().await.unwrap();
        assert_eq!(drafts.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_drafts() {
        let drafts = MemoryDrafts::with(Answers::default());
        assert!(drafts.load().await.unwrap().is_some());
        drafts.clear().await.unwrap();
        assert!(drafts.load().await.unwrap().is_none());
    }
}
