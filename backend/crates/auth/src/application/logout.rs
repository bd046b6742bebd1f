//! Logout Use Case
//!
//! Invalidates the current session.

use crate::application::session_service::SessionService;
use crate::domain::repository::SessionRepository;
use crate::domain::value_object::session_token::SessionId;
use crate::error::{AuthError, AuthResult};

/// Logout use case
pub struct LogoutUseCase<R>
where
    R: SessionRepository,
{
    sessions: SessionService<R>,
}

impl<R> LogoutUseCase<R>
where
    R: SessionRepository + Send + Sync,
{
    pub fn new(sessions: SessionService<R>) -> Self {
        Self { sessions }
    }

    /// Sign out from the current session, if any
    pub async fn execute(&self, session_id: Option<&SessionId>) -> AuthResult<()> {
        let session_id = session_id.ok_or(AuthError::NotAuthenticated)?;
        self.sessions.invalidate_session(session_id).await?;

        tracing::info!("User logged out");
        Ok(())
    }
}
