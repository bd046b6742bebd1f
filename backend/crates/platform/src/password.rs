//! Password Hashing and Verification
//!
//! scrypt-based password handling:
//! - Fixed cost parameters (N=16384, r=8, p=1, 32-byte digest)
//! - 16-byte per-user salt supplied by the caller
//! - Storage format `hex(salt):hex(digest)`
//! - Zeroization of clear text passwords
//! - Constant-time digest comparison
//!
//! The cost parameters are part of the storage format: hashes carry no
//! parameter header, so changing any constant invalidates every stored hash.

use std::fmt;

use scrypt::Params;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::constant_time_eq;

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length (UTF-16 code units)
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum password length (UTF-16 code units)
pub const MAX_PASSWORD_LENGTH: usize = 255;

/// log2(N): N = 16384
pub const SCRYPT_LOG_N: u8 = 14;

/// Block size parameter
pub const SCRYPT_R: u32 = 8;

/// Parallelization parameter
pub const SCRYPT_P: u32 = 1;

/// Derived key length in bytes
pub const SCRYPT_KEY_LEN: usize = 32;

/// Salt length in bytes
pub const SALT_LEN: usize = 16;

/// Separator between the salt and digest halves
const HASH_SEPARATOR: char = ':';

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Stored value is not `hex(salt):hex(digest)`
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password, enforcing the length policy
    ///
    /// Length is counted in UTF-16 code units; the content is not
    /// normalized or restricted in any other way.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let length = policy_length(&raw);

        if length < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: length,
            });
        }

        if length > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: length,
            });
        }

        Ok(Self(raw))
    }

    /// Whether `raw` satisfies the length policy
    pub fn is_acceptable(raw: &str) -> bool {
        (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&policy_length(raw))
    }

    /// Create without validation
    #[cfg(test)]
    pub fn new_unchecked(raw: String) -> Self {
        Self(raw)
    }

    /// Get the password as UTF-8 bytes for hashing
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash the password with the given salt
    ///
    /// CPU and memory heavy (16 MiB); run it off the async executor.
    pub fn hash(&self, salt: [u8; SALT_LEN]) -> Result<HashedPassword, PasswordHashError> {
        let digest = derive_key(self.as_bytes(), &salt, &system_params()?)?;

        Ok(HashedPassword {
            encoded: format!("{}{}{}", hex::encode(salt), HASH_SEPARATOR, hex::encode(digest)),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in `hex(salt):hex(digest)` form
///
/// Values read back from storage are not validated on construction; a
/// malformed value is reported by [`HashedPassword::verify`] so that the
/// caller can tell data corruption apart from a wrong password.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    encoded: String,
}

impl HashedPassword {
    /// Wrap a stored value as-is
    pub fn from_stored(encoded: impl Into<String>) -> Self {
        Self {
            encoded: encoded.into(),
        }
    }

    /// Get the encoded string for storage
    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    /// Split into decoded salt and digest hex
    ///
    /// Requires exactly one separator with non-empty halves, and a salt
    /// half that is valid hex.
    fn parts(&self) -> Result<(Vec<u8>, &str), PasswordHashError> {
        let mut parts = self.encoded.split(HASH_SEPARATOR);

        let (salt_hex, digest_hex) = match (parts.next(), parts.next(), parts.next()) {
            (Some(salt), Some(digest), None) if !salt.is_empty() && !digest.is_empty() => {
                (salt, digest)
            }
            _ => return Err(PasswordHashError::InvalidHashFormat),
        };

        let salt = hex::decode(salt_hex).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        Ok((salt, digest_hex))
    }

    /// Verify a password against this hash
    ///
    /// ## Returns
    /// - `Ok(true)` / `Ok(false)` for match / mismatch
    /// - `Err(InvalidHashFormat)` if the stored value is malformed
    pub fn verify(&self, password: &ClearTextPassword) -> Result<bool, PasswordHashError> {
        self.verify_with(password, &system_params()?)
    }

    fn verify_with(
        &self,
        password: &ClearTextPassword,
        params: &Params,
    ) -> Result<bool, PasswordHashError> {
        let (salt, stored_digest_hex) = self.parts()?;
        let digest = derive_key(password.as_bytes(), &salt, params)?;
        let digest_hex = hex::encode(digest);

        Ok(constant_time_eq(
            digest_hex.as_bytes(),
            stored_digest_hex.as_bytes(),
        ))
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn system_params() -> Result<Params, PasswordHashError> {
    Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, SCRYPT_KEY_LEN)
        .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))
}

fn derive_key(
    password: &[u8],
    salt: &[u8],
    params: &Params,
) -> Result<[u8; SCRYPT_KEY_LEN], PasswordHashError> {
    let mut output = [0u8; SCRYPT_KEY_LEN];
    scrypt::scrypt(password, salt, params, &mut output)
        .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;
    Ok(output)
}

fn policy_length(raw: &str) -> usize {
    raw.encode_utf16().count()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SALT: [u8; SALT_LEN] = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ];

    #[test]
    fn test_length_policy_bounds() {
        assert!(matches!(
            ClearTextPassword::new("a".repeat(5)),
            Err(PasswordPolicyError::TooShort { min: 6, actual: 5 })
        ));
        assert!(ClearTextPassword::new("a".repeat(6)).is_ok());
        assert!(ClearTextPassword::new("a".repeat(255)).is_ok());
        assert!(matches!(
            ClearTextPassword::new("a".repeat(256)),
            Err(PasswordPolicyError::TooLong { max: 255, actual: 256 })
        ));
    }

    #[test]
    fn test_length_counts_utf16_units() {
        // 3 astral characters = 6 UTF-16 units
        assert!(ClearTextPassword::is_acceptable("😀😀😀"));
        // 5 BMP characters = 5 units even though they are 15 UTF-8 bytes
        assert!(!ClearTextPassword::is_acceptable("パスワード"));
    }

    #[test]
    fn test_no_character_restrictions() {
        assert!(ClearTextPassword::is_acceptable("      "));
        assert!(ClearTextPassword::is_acceptable("\t\n\u{0}abc"));
    }

    #[test]
    fn test_rfc7914_vector_at_system_parameters() {
        // RFC 7914 §12, N=16384 r=8 p=1, first 32 bytes of the 64-byte output
        let digest = derive_key(b"pleaseletmein", b"SodiumChloride", &system_params().unwrap())
            .unwrap();
        assert_eq!(
            hex::encode(digest),
            "7023bdcb3afd7348461c06cd81fd38ebfda8fbba904f8e3ea9b543f6545da1f2"
        );
    }

    #[test]
    fn test_hash_format() {
        let password = ClearTextPassword::new_unchecked("secret1".to_string());
        let hashed = password.hash(SALT).unwrap();

        let (salt_hex, digest_hex) = hashed.as_str().split_once(':').unwrap();
        assert_eq!(salt_hex, "00112233445566778899aabbccddeeff");
        assert_eq!(digest_hex.len(), 64);
        assert!(digest_hex.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }

    #[test]
    fn test_hash_is_deterministic_for_same_salt() {
        let password = ClearTextPassword::new_unchecked("secret1".to_string());
        assert_eq!(password.hash(SALT).unwrap(), password.hash(SALT).unwrap());
    }

    #[test]
    fn test_hash_and_verify() {
        let password = ClearTextPassword::new_unchecked("secret1".to_string());
        let hashed = password.hash(SALT).unwrap();

        assert!(hashed.verify(&password).unwrap());

        let wrong = ClearTextPassword::new_unchecked("wrongpass".to_string());
        assert!(!hashed.verify(&wrong).unwrap());
    }

    #[test]
    fn test_changed_parameters_break_verification() {
        let password = ClearTextPassword::new_unchecked("secret1".to_string());
        let hashed = password.hash(SALT).unwrap();

        let variants = [
            Params::new(SCRYPT_LOG_N - 1, SCRYPT_R, SCRYPT_P, SCRYPT_KEY_LEN).unwrap(),
            Params::new(SCRYPT_LOG_N, SCRYPT_R + 1, SCRYPT_P, SCRYPT_KEY_LEN).unwrap(),
            Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P + 1, SCRYPT_KEY_LEN).unwrap(),
        ];
        for params in &variants {
            assert!(!hashed.verify_with(&password, params).unwrap());
        }

        // A different key length changes the digest length, never matching
        let short = Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, 16).unwrap();
        let mut output = [0u8; 16];
        scrypt::scrypt(password.as_bytes(), &SALT, &short, &mut output).unwrap();
        let (_, digest_hex) = hashed.as_str().split_once(':').unwrap();
        assert_ne!(hex::encode(output), digest_hex);
    }

    #[test]
    fn test_malformed_stored_values() {
        let password = ClearTextPassword::new_unchecked("secret1".to_string());

        for stored in [
            "",
            "no-separator",
            ":",
            "0011:",
            ":abcd",
            "0011:abcd:ef",
            "zz11:abcd",
        ] {
            let hashed = HashedPassword::from_stored(stored);
            assert!(
                matches!(
                    hashed.verify(&password),
                    Err(PasswordHashError::InvalidHashFormat)
                ),
                "expected malformed: {stored:?}"
            );
        }
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::new_unchecked("secret1".to_string());
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret1"));

        let hashed = password.hash(SALT).unwrap();
        assert!(!format!("{:?}", hashed).contains("0011"));
    }
}
