//! Per-request visitor identity for analytics.

use axum::{
    extract::FromRequestParts,
    http::{header::USER_AGENT, request::Parts},
};
use tower_sessions::Session;
use uuid::Uuid;

use lease_small_space_core::UserId;
use lease_small_space_core::analytics::EventContext;

/// Session key holding the anonymous visitor id.
pub const VISITOR_ID_KEY: &str = "lss_visitor_id";

/// Session key holding the user id once a questionnaire is stored.
pub const USER_ID_KEY: &str = "lss_user_id";

/// The visitor's session (when the session layer is installed) and the
/// analytics context for this request.
#[derive(Debug, Clone)]
pub struct Visitor {
    pub session: Option<Session>,
    pub context: EventContext,
}

impl Visitor {
    /// Remember the stored user for later events in this session.
    pub async fn identify(&mut self, user_id: UserId) {
        self.context.user_id = Some(user_id);
        if let Some(session) = &self.session
            && let Err(e) = session.insert(USER_ID_KEY, user_id).await
        {
            tracing::warn!(error = %e, "Failed to store user id in session");
        }
    }
}

impl<S> FromRequestParts<S> for Visitor
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts.extensions.get::<Session>().cloned();

        let mut context = EventContext {
            page_url: Some(
                parts
                    .uri
                    .path_and_query()
                    .map_or_else(|| parts.uri.path().to_owned(), ToString::to_string),
            ),
            user_agent: parts
                .headers
                .get(USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned),
            ..EventContext::default()
        };

        if let Some(session) = &session {
            context.session_id = Some(visitor_id(session).await);
            context.user_id = session.get::<UserId>(USER_ID_KEY).await.ok().flatten();
        }

        Ok(Self { session, context })
    }
}

async fn visitor_id(session: &Session) -> String {
    if let Ok(Some(id)) = session.get::<String>(VISITOR_ID_KEY).await {
        return id;
    }
    let id = Uuid::new_v4().to_string();
    if let Err(e) = session.insert(VISITOR_ID_KEY, &id).await {
        tracing::debug!(error = %e, "Failed to store visitor id");
    }
    id
}
