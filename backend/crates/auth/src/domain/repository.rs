//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};

use crate::domain::entity::{session::Session, user::User};
use crate::domain::value_object::{session_token::SessionId, user_name::UserName};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find user by exact user name
    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>>;

    /// Insert a new user
    ///
    /// Uniqueness of the user name is enforced atomically; a clash is
    /// reported as `AuthError::UserNameTaken`.
    async fn create(&self, user: &User) -> AuthResult<()>;
}

/// Session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Create a new session
    async fn create(&self, session: &Session) -> AuthResult<()>;

    /// Find a session together with its owner
    async fn find_with_user(&self, session_id: &SessionId) -> AuthResult<Option<(Session, User)>>;

    /// Persist a new expiry
    async fn update_expiry(&self, session_id: &SessionId, expires_at: DateTime<Utc>) -> AuthResult<()>;

    /// Delete a session (no-op if absent)
    async fn delete(&self, session_id: &SessionId) -> AuthResult<()>;

    /// Delete every session expired at `now`, returning the count
    async fn delete_expired(&self, now: DateTime<Utc>) -> AuthResult<u64>;
}
