//! Admin authentication service.
//!
//! There is a single shared access token. The login form posts it, it is
//! checked with an HMAC comparison, and the session is marked as signed
//! in. Session contents live in [`crate::models`].

mod error;

pub use error::AdminAuthError;

use chrono::Utc;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use tower_sessions::Session;

use crate::models::{CurrentAdmin, session_keys};

type HmacSha256 = Hmac<Sha256>;

/// The configured access token, kept as its own MAC so candidates are
/// compared in constant time.
#[derive(Clone)]
pub struct AccessToken {
    key: SecretString,
    tag: Vec<u8>,
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

fn mac_for(key: &SecretString) -> Option<HmacSha256> {
    HmacSha256::new_from_slice(key.expose_secret().as_bytes()).ok()
}

impl AccessToken {
    #[must_use]
    pub fn new(token: SecretString) -> Self {
        // An empty tag never verifies.
        let tag = mac_for(&token)
            .map(|mut mac| {
                mac.update(token.expose_secret().as_bytes());
                mac.finalize().into_bytes().to_vec()
            })
            .unwrap_or_default();
        Self { key: token, tag }
    }

    /// Whether `candidate` is the configured token.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        mac_for(&self.key).is_some_and(|mut mac| {
            mac.update(candidate.as_bytes());
            mac.verify_slice(&self.tag).is_ok()
        })
    }
}

/// Admin authentication service.
pub struct AdminAuthService<'a> {
    token: &'a AccessToken,
}

impl<'a> AdminAuthService<'a> {
    #[must_use]
    pub const fn new(token: &'a AccessToken) -> Self {
        Self { token }
    }

    /// Check `candidate` and sign the session in.
    ///
    /// The session id is rotated on success.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::InvalidToken` on a mismatch, or
    /// `AdminAuthError::Session` if the session store fails.
    pub async fn login(
        &self,
        session: &Session,
        candidate: &str,
    ) -> Result<CurrentAdmin, AdminAuthError> {
        if !self.token.verify(candidate.trim()) {
            return Err(AdminAuthError::InvalidToken);
        }

        session.cycle_id().await?;
        let admin = CurrentAdmin {
            logged_in_at: Utc::now(),
        };
        session.insert(session_keys::CURRENT_ADMIN, &admin).await?;
        Ok(admin)
    }

    /// Sign the session out and drop its data.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::Session` if the session store fails.
    pub async fn logout(session: &Session) -> Result<(), AdminAuthError> {
        session.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    const TOKEN: &str = "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6%";

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[test]
    fn test_verify() {
        let token = AccessToken::new(SecretString::from(TOKEN));
        assert!(token.verify(TOKEN));
        assert!(!token.verify(""));
        assert!(!token.verify(&TOKEN[..TOKEN.len() - 1]));
        assert!(!format!("{token:?}").contains(TOKEN));
    }

    #[tokio::test]
    async fn test_login_marks_session() {
        let token = AccessToken::new(SecretString::from(TOKEN));
        let service = AdminAuthService::new(&token);
        let session = session();

        service.login(&session, &format!(" {TOKEN}\n")).await.unwrap();
        let stored: Option<CurrentAdmin> = session.get(session_keys::CURRENT_ADMIN).await.unwrap();
        assert!(stored.is_some());

        AdminAuthService::logout(&session).await.unwrap();
        let stored: Option<CurrentAdmin> = session.get(session_keys::CURRENT_ADMIN).await.unwrap();
        assert!(stored.is_none());
    }

    #[tokio::test]
    async fn test_wrong_token_leaves_session_alone() {
        let token = AccessToken::new(SecretString::from(TOKEN));
        let session = session();
        let result = AdminAuthService::new(&token).login(&session, "guess").await;

        assert!(matches!(result, Err(AdminAuthError::InvalidToken)));
        let stored: Option<CurrentAdmin> = session.get(session_keys::CURRENT_ADMIN).await.unwrap();
        assert!(stored.is_none());
    }
}
