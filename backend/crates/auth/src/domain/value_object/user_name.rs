//! User Name Value Object
//!
//! ユーザー名はログインに使う公開識別子（ハンドル）。
//!
//! ## 不変条件
//! - 長さ: 3〜31文字
//! - 使用可能文字: `a-z`, `0-9`, `_`, `-` のみ（大文字不可）
//! - 正規化・小文字化は行わない（入力そのものを比較に使う）

use derive_more::Display;
use serde::Serialize;
use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// Minimum length for user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 3;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 31;

// ============================================================================
// Error Types
// ============================================================================

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    /// Field was not submitted
    Missing,

    /// User name is too short (minimum: USER_NAME_MIN_LENGTH)
    TooShort { length: usize, min: usize },

    /// User name is too long (maximum: USER_NAME_MAX_LENGTH)
    TooLong { length: usize, max: usize },

    /// User name contains a character outside `[a-z0-9_-]`
    InvalidCharacter { char: char, position: usize },
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "User name is required"),
            Self::TooShort { length, min } => {
                write!(f, "User name is too short ({length} chars, minimum {min})")
            }
            Self::TooLong { length, max } => {
                write!(f, "User name is too long ({length} chars, maximum {max})")
            }
            Self::InvalidCharacter { char, position } => {
                write!(
                    f,
                    "Invalid character '{char}' at position {position}. Only a-z, 0-9, _, - are allowed"
                )
            }
        }
    }
}

impl std::error::Error for UserNameError {}

// ============================================================================
// UserName Value Object
// ============================================================================

/// Validated user name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    /// Validate raw form input
    pub fn new(input: Option<String>) -> Result<Self, UserNameError> {
        let input = input.ok_or(UserNameError::Missing)?;
        check(&input)?;
        Ok(Self(input))
    }

    /// Wrap a value read from storage
    ///
    /// Only values that passed [`UserName::new`] are ever written.
    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// True iff `input` is 3 to 31 characters of `[a-z0-9_-]`
pub fn validate_username(input: &str) -> bool {
    check(input).is_ok()
}

fn check(input: &str) -> Result<(), UserNameError> {
    if let Some((position, char)) = input
        .chars()
        .enumerate()
        .find(|(_, c)| !is_allowed_char(*c))
    {
        return Err(UserNameError::InvalidCharacter { char, position });
    }

    // Only ASCII remains, so byte length equals character count
    let length = input.len();
    if length < USER_NAME_MIN_LENGTH {
        return Err(UserNameError::TooShort {
            length,
            min: USER_NAME_MIN_LENGTH,
        });
    }
    if length > USER_NAME_MAX_LENGTH {
        return Err(UserNameError::TooLong {
            length,
            max: USER_NAME_MAX_LENGTH,
        });
    }

    Ok(())
}

fn is_allowed_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '-')
}

// ============================================================================
// Tests
// ============================================================================
