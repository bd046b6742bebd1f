//! Register Use Case
//!
//! Creates a new user account and signs it in.

use std::sync::Arc;

use platform::crypto::{RandomSource, random_array};
use platform::password::SALT_LEN;

use crate::application::session_service::{IssuedSession, SessionService};
use crate::domain::entity::user::User;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{
    user_id::generate_user_id,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input (raw form fields)
#[derive(Debug, Default)]
pub struct RegisterInput {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository + SessionRepository,
{
    repo: Arc<R>,
    sessions: SessionService<R>,
    rng: Arc<dyn RandomSource>,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository + SessionRepository + Send + Sync,
{
    pub fn new(repo: Arc<R>, sessions: SessionService<R>, rng: Arc<dyn RandomSource>) -> Self {
        Self {
            repo,
            sessions,
            rng,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<IssuedSession> {
        let user_name = UserName::new(input.username)
            .map_err(|_| AuthError::InvalidInput("Invalid username"))?;
        let password = RawPassword::new(input.password)
            .map_err(|_| AuthError::InvalidInput("Invalid password"))?;

        let user_id = generate_user_id(self.rng.as_ref());
        let salt: [u8; SALT_LEN] = random_array(self.rng.as_ref());

        let password_hash = tokio::task::spawn_blocking(move || UserPassword::hash(&password, salt))
            .await
            .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {e}")))??;

        let user = User::new(user_id, user_name, password_hash);

        UserRepository::create(self.repo.as_ref(), &user)
            .await
            .map_err(|e| AuthError::RegistrationFailed(Box::new(e)))?;

        let issued = self
            .sessions
            .issue(user.user_id)
            .await
            .map_err(|e| AuthError::RegistrationFailed(Box::new(e)))?;

        tracing::info!(user_id = %user.user_id, user_name = %user.user_name, "User registered");

        Ok(issued)
    }
}
