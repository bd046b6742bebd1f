//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{
    session_token::SessionId, user_id::UserId, user_name::UserName, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, user_name, password_hash, created_at
            FROM users
            WHERE user_name = $1
            "#,
        )
        .bind(user_name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (user_id, user_name, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.user_name.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::UserNameTaken,
            other => AuthError::Database(other),
        })?;

        Ok(())
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgAuthRepository {
    async fn create(&self, session: &Session) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_sessions (session_id, user_id, expires_at, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(session.session_id.as_str())
        .bind(session.user_id.as_uuid())
        .bind(session.expires_at)
        .bind(session.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_with_user(&self, session_id: &SessionId) -> AuthResult<Option<(Session, User)>> {
        let row = sqlx::query_as::<_, SessionUserRow>(
            r#"
            SELECT
                s.session_id,
                s.expires_at,
                s.created_at AS session_created_at,
                u.user_id,
                u.user_name,
                u.password_hash,
                u.created_at AS user_created_at
            FROM auth_sessions s
            INNER JOIN users u ON u.user_id = s.user_id
            WHERE s.session_id = $1
            "#,
        )
        .bind(session_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SessionUserRow::into_pair))
    }

    async fn update_expiry(&self, session_id: &SessionId, expires_at: DateTime<Utc>) -> AuthResult<()> {
        sqlx::query("UPDATE auth_sessions SET expires_at = $2 WHERE session_id = $1")
            .bind(session_id.as_str())
            .bind(expires_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, session_id: &SessionId) -> AuthResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE session_id = $1")
            .bind(session_id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM auth_sessions WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired auth sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    user_name: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            user_id: UserId::from_uuid(self.user_id),
            user_name: UserName::from_db(self.user_name),
            password_hash: UserPassword::from_db(self.password_hash),
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SessionUserRow {
    session_id: String,
    expires_at: DateTime<Utc>,
    session_created_at: DateTime<Utc>,
    user_id: Uuid,
    user_name: String,
    password_hash: String,
    user_created_at: DateTime<Utc>,
}

impl SessionUserRow {
    fn into_pair(self) -> (Session, User) {
        let user_id = UserId::from_uuid(self.user_id);
        let session = Session {
            session_id: SessionId::from_db(self.session_id),
            user_id,
            expires_at: self.expires_at,
            created_at: self.session_created_at,
        };
        let user = User {
            user_id,
            user_name: UserName::from_db(self.user_name),
            password_hash: UserPassword::from_db(self.password_hash),
            created_at: self.user_created_at,
        };
        (session, user)
    }
}
