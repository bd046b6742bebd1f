//! Session Service
//!
//! Issues, validates, renews, and invalidates login sessions.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use platform::crypto::RandomSource;

use crate::application::config::AuthConfig;
use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::SessionRepository;
use crate::domain::value_object::{
    session_token::{SessionId, SessionToken},
    user_id::UserId,
};
use crate::error::AuthResult;

/// A freshly issued session, ready for the cookie
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: SessionToken,
    pub expires_at: DateTime<Utc>,
}

/// A session that passed validation, with its owner
#[derive(Debug, Clone)]
pub struct ValidatedSession {
    pub session: Session,
    pub user: User,
}

/// Session service
pub struct SessionService<R>
where
    R: SessionRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
    rng: Arc<dyn RandomSource>,
}

impl<R> Clone for SessionService<R>
where
    R: SessionRepository,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            config: Arc::clone(&self.config),
            rng: Arc::clone(&self.rng),
        }
    }
}

impl<R> SessionService<R>
where
    R: SessionRepository + Send + Sync,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>, rng: Arc<dyn RandomSource>) -> Self {
        Self { repo, config, rng }
    }

    /// Generate a new opaque token
    pub fn generate_session_token(&self) -> SessionToken {
        SessionToken::generate(self.rng.as_ref())
    }

    /// Persist a session for `token`, expiring one TTL from now
    pub async fn create_session(
        &self,
        token: &SessionToken,
        user_id: UserId,
    ) -> AuthResult<Session> {
        let session = Session::new(
            token.session_id(),
            user_id,
            Utc::now(),
            self.config.session_ttl,
        );
        self.repo.create(&session).await?;

        tracing::debug!(user_id = %session.user_id, "Session created");
        Ok(session)
    }

    /// Generate a token and create its session
    pub async fn issue(&self, user_id: UserId) -> AuthResult<IssuedSession> {
        let token = self.generate_session_token();
        let session = self.create_session(&token, user_id).await?;

        Ok(IssuedSession {
            token,
            expires_at: session.expires_at,
        })
    }

    /// Resolve a token to its session and user
    ///
    /// Expired sessions are deleted. Sessions inside the renewal window are
    /// extended to a full TTL.
    pub async fn validate_session_token(
        &self,
        token: &SessionToken,
    ) -> AuthResult<Option<ValidatedSession>> {
        let session_id = token.session_id();
        let Some((mut session, user)) = self.repo.find_with_user(&session_id).await? else {
            return Ok(None);
        };

        let now = Utc::now();
        if session.is_expired_at(now) {
            self.repo.delete(&session_id).await?;
            tracing::debug!(user_id = %session.user_id, "Expired session removed");
            return Ok(None);
        }

        if session.needs_renewal_at(now, self.config.session_renew_threshold) {
            session.renew(now, self.config.session_ttl);
            self.repo
                .update_expiry(&session_id, session.expires_at)
                .await?;
            tracing::debug!(user_id = %session.user_id, "Session renewed");
        }

        Ok(Some(ValidatedSession { session, user }))
    }

    /// Delete a session
    pub async fn invalidate_session(&self, session_id: &SessionId) -> AuthResult<()> {
        self.repo.delete(session_id).await
    }

    /// Delete all expired sessions, returning how many were removed
    pub async fn delete_expired_sessions(&self) -> AuthResult<u64> {
        self.repo.delete_expired(Utc::now()).await
    }
}
