//! User Password Value Object
//!
//! Domain value object for user passwords.
//! Delegates to `platform::password` for cryptographic operations.
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new(Some("secret1".to_string())).unwrap();
//! let hashed = UserPassword::hash(&raw, [7u8; 16]).unwrap();
//! assert!(hashed.verify(&raw).unwrap());
//! ```

use platform::password::{
    ClearTextPassword, HashedPassword, PasswordPolicyError, SALT_LEN,
};
use std::fmt;

use crate::error::AuthResult;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Reason a submitted password was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawPasswordError {
    Missing,
    Policy(PasswordPolicyError),
}

impl fmt::Display for RawPasswordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "Password is required"),
            Self::Policy(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RawPasswordError {}

/// Raw password from user input
///
/// Memory is zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate raw form input (6 to 255 characters, any content)
    pub fn new(raw: Option<String>) -> Result<Self, RawPasswordError> {
        let raw = raw.ok_or(RawPasswordError::Missing)?;
        ClearTextPassword::new(raw)
            .map(Self)
            .map_err(RawPasswordError::Policy)
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// True iff `input` is 6 to 255 characters long
pub fn validate_password(input: &str) -> bool {
    ClearTextPassword::is_acceptable(input)
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password, `hex(salt):hex(digest)`
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a validated raw password with a fresh salt
    ///
    /// Runs scrypt synchronously; call from a blocking context.
    pub fn hash(raw: &RawPassword, salt: [u8; SALT_LEN]) -> AuthResult<Self> {
        Ok(Self(raw.0.hash(salt)?))
    }

    /// Wrap the stored value as-is; format problems surface in [`UserPassword::verify`]
    pub fn from_db(value: String) -> Self {
        Self(HashedPassword::from_stored(value))
    }

    /// Value for database storage
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Verify a raw password against this hash
    ///
    /// ## Errors
    /// `AuthError::MalformedPasswordHash` if the stored value is not `salt:digest`
    pub fn verify(&self, raw: &RawPassword) -> AuthResult<bool> {
        Ok(self.0.verify(&raw.0)?)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;

    #[test]
    fn test_raw_password_validation() {
        assert!(RawPassword::new(Some("secret1".to_string())).is_ok());
        assert!(matches!(
            RawPassword::new(Some("12345".to_string())),
            Err(RawPasswordError::Policy(PasswordPolicyError::TooShort { .. }))
        ));
        assert!(matches!(
            RawPassword::new(Some("a".repeat(256))),
            Err(RawPasswordError::Policy(PasswordPolicyError::TooLong { .. }))
        ));
        assert_eq!(RawPassword::new(None).unwrap_err(), RawPasswordError::Missing);
    }

    #[test]
    fn test_validate_password_is_length_only() {
        for len in 0..300 {
            let s = "x".repeat(len);
            assert_eq!(validate_password(&s), (6..=255).contains(&len), "len {len}");
        }
        assert!(validate_password("!!!!!!"));
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new(Some("secret1".to_string())).unwrap();
        let hashed = UserPassword::hash(&raw, [1u8; 16]).unwrap();

        assert!(hashed.verify(&raw).unwrap());

        let wrong = RawPassword::new(Some("wrongpass".to_string())).unwrap();
        assert!(!hashed.verify(&wrong).unwrap());
    }

    #[test]
    fn test_db_roundtrip() {
        let raw = RawPassword::new(Some("secret1".to_string())).unwrap();
        let hashed = UserPassword::hash(&raw, [2u8; 16]).unwrap();

        let restored = UserPassword::from_db(hashed.as_str().to_string());
        assert!(restored.verify(&raw).unwrap());
    }

    #[test]
    fn test_malformed_stored_hash() {
        let raw = RawPassword::new(Some("secret1".to_string())).unwrap();
        let stored = UserPassword::from_db("deadbeef".to_string());
        assert!(matches!(
            stored.verify(&raw),
            Err(AuthError::MalformedPasswordHash)
        ));
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new(Some("secret1".to_string())).unwrap();
        let debug = format!("{:?}", raw);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("secret1"));
    }
}
