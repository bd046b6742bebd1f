//! Session Entity
//!
//! A login session. Keyed by the SHA-256 of the client token, so a leaked
//! session table does not expose usable tokens.

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::{session_token::SessionId, user_id::UserId};

/// Session entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create a session expiring `ttl` after `now`
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(session_id: SessionId, user_id: UserId, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            session_id,
            user_id,
            expires_at: now + ttl,
            created_at: now,
        }
    }

    /// Expired once `now` reaches `expires_at`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether fewer than `threshold` remains before expiry
    pub fn needs_renewal_at(&self, now: DateTime<Utc>, threshold: Duration) -> bool {
        now >= self.expires_at - threshold
    }

    /// Push expiry out to `now + ttl`
    pub fn renew(&mut self, now: DateTime<Utc>, ttl: Duration) {
        self.expires_at = now + ttl;
    }

    /// Whole seconds left, clamped at zero (cookie Max-Age)
    pub fn remaining_secs_at(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::Id;

    fn session(now: DateTime<Utc>) -> Session {
        Session::new(
            SessionId::from_db("abc".to_string()),
            Id::from_random_bytes([3u8; 16]),
            now,
            Duration::days(30),
        )
    }

    #[test]
    fn test_new_session_expiry() {
        let now = Utc::now();
        let s = session(now);
        assert_eq!(s.expires_at, now + Duration::days(30));
        assert_eq!(s.created_at, now);
        assert!(!s.is_expired_at(now));
        assert_eq!(s.remaining_secs_at(now), 30 * 24 * 60 * 60);
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let s = session(now);
        assert!(!s.is_expired_at(s.expires_at - Duration::seconds(1)));
        assert!(s.is_expired_at(s.expires_at));
        assert_eq!(s.remaining_secs_at(s.expires_at + Duration::days(1)), 0);
    }

    #[test]
    fn test_renewal_window() {
        let now = Utc::now();
        let mut s = session(now);
        let threshold = Duration::days(15);

        assert!(!s.needs_renewal_at(now + Duration::days(14), threshold));
        assert!(s.needs_renewal_at(now + Duration::days(15), threshold));

        let later = now + Duration::days(20);
        s.renew(later, Duration::days(30));
        assert_eq!(s.expires_at, later + Duration::days(30));
        assert!(!s.needs_renewal_at(later, threshold));
    }
}
