//! In-Memory Repository Implementations
//!
//! Used by tests and local demos. User name uniqueness is checked under the
//! write lock, matching the unique index of the PostgreSQL store.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{session_token::SessionId, user_id::UserId, user_name::UserName};
use crate::error::{AuthError, AuthResult};

/// In-memory auth repository
#[derive(Debug, Default)]
pub struct MemoryAuthRepository {
    users: RwLock<HashMap<UserId, User>>,
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl MemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    /// Number of stored sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Look up a session by id
    pub async fn session(&self, session_id: &SessionId) -> Option<Session> {
        self.sessions.read().await.get(session_id).cloned()
    }

    /// Overwrite a stored user's password hash
    #[cfg(test)]
    pub async fn set_password_hash(&self, user_name: &UserName, hash: &str) -> bool {
        use crate::domain::value_object::user_password::UserPassword;

        let mut users = self.users.write().await;
        match users.values_mut().find(|u| &u.user_name == user_name) {
            Some(user) => {
                user.password_hash = UserPassword::from_db(hash.to_string());
                true
            }
            None => false,
        }
    }
}

impl UserRepository for MemoryAuthRepository {
    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| &u.user_name == user_name).cloned())
    }

    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.user_name == user.user_name) {
            return Err(AuthError::UserNameTaken);
        }
        if users.contains_key(&user.user_id) {
            return Err(AuthError::Internal("Duplicate user id".to_string()));
        }
        users.insert(user.user_id, user.clone());
        Ok(())
    }
}

impl SessionRepository for MemoryAuthRepository {
    async fn create(&self, session: &Session) -> AuthResult<()> {
        self.sessions
            .write()
            .await
            .insert(session.session_id.clone(), session.clone());
        Ok(())
    }

    async fn find_with_user(&self, session_id: &SessionId) -> AuthResult<Option<(Session, User)>> {
        let Some(session) = self.sessions.read().await.get(session_id).cloned() else {
            return Ok(None);
        };
        let user = self.users.read().await.get(&session.user_id).cloned();
        Ok(user.map(|user| (session, user)))
    }

    async fn update_expiry(&self, session_id: &SessionId, expires_at: DateTime<Utc>) -> AuthResult<()> {
        if let Some(session) = self.sessions.write().await.get_mut(session_id) {
            session.expires_at = expires_at;
        }
        Ok(())
    }

    async fn delete(&self, session_id: &SessionId) -> AuthResult<()> {
        self.sessions.write().await.remove(session_id);
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AuthResult<u64> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(now));
        Ok((before - sessions.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::UserPassword;
    use chrono::Duration;
    use kernel::id::Id;

    fn user(name: &str, seed: u8) -> User {
        User::new(
            Id::from_random_bytes([seed; 16]),
            UserName::new(Some(name.to_string())).unwrap(),
            UserPassword::from_db("00:11".to_string()),
        )
    }

    #[tokio::test]
    async fn test_user_name_is_unique() {
        let repo = MemoryAuthRepository::new();
        UserRepository::create(&repo, &user("alice", 1)).await.unwrap();

        let result = UserRepository::create(&repo, &user("alice", 2)).await;
        assert!(matches!(result, Err(AuthError::UserNameTaken)));
        assert_eq!(repo.user_count().await, 1);
    }

    #[tokio::test]
    async fn test_find_by_user_name_is_exact() {
        let repo = MemoryAuthRepository::new();
        UserRepository::create(&repo, &user("alice", 1)).await.unwrap();

        let found = repo
            .find_by_user_name(&UserName::from_db("alice".to_string()))
            .await
            .unwrap();
        assert!(found.is_some());

        let missing = repo
            .find_by_user_name(&UserName::from_db("alic".to_string()))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_delete_expired() {
        let repo = MemoryAuthRepository::new();
        let owner = user("alice", 1);
        UserRepository::create(&repo, &owner).await.unwrap();

        let now = Utc::now();
        let live = Session::new(
            SessionId::from_db("live".to_string()),
            owner.user_id,
            now,
            Duration::days(1),
        );
        let stale = Session::new(
            SessionId::from_db("stale".to_string()),
            owner.user_id,
            now - Duration::days(2),
            Duration::days(1),
        );
        SessionRepository::create(&repo, &live).await.unwrap();
        SessionRepository::create(&repo, &stale).await.unwrap();

        assert_eq!(repo.delete_expired(now).await.unwrap(), 1);
        assert!(repo.session(&live.session_id).await.is_some());
        assert!(repo.session(&stale.session_id).await.is_none());
    }
}
