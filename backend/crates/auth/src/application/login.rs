//! Login Use Case
//!
//! Authenticates a user by name and password and creates a session.

use std::sync::Arc;

use crate::application::session_service::{IssuedSession, SessionService};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{user_name::UserName, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Login input (raw form fields)
#[derive(Debug, Default)]
pub struct LoginInput {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository + SessionRepository,
{
    repo: Arc<R>,
    sessions: SessionService<R>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository + SessionRepository + Send + Sync,
{
    pub fn new(repo: Arc<R>, sessions: SessionService<R>) -> Self {
        Self { repo, sessions }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<IssuedSession> {
        let user_name = UserName::new(input.username).map_err(|_| {
            AuthError::InvalidInput(
                "Invalid username (min 3, max 31 characters, alphanumeric only)",
            )
        })?;
        let password = RawPassword::new(input.password).map_err(|_| {
            AuthError::InvalidInput("Invalid password (min 6, max 255 characters)")
        })?;

        // Unknown user and wrong password are indistinguishable to the client
        let user = self
            .repo
            .find_by_user_name(&user_name)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let stored = user.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || stored.verify(&password))
            .await
            .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {e}")))?
            .inspect_err(|e| {
                if matches!(e, AuthError::MalformedPasswordHash) {
                    tracing::error!(user_id = %user.user_id, "Stored password hash is corrupt");
                }
            })?;

        if !valid {
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self.sessions.issue(user.user_id).await?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(issued)
    }
}
