//! User Entity
//!
//! A registered account. Created on registration, read on login.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{user_id::UserId, user_name::UserName, user_password::UserPassword};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique, `[a-z0-9_-]{3,31}`
    pub user_name: UserName,
    /// `hex(salt):hex(scrypt digest)`
    pub password_hash: UserPassword,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(user_id: UserId, user_name: UserName, password_hash: UserPassword) -> Self {
        Self {
            user_id,
            user_name,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
