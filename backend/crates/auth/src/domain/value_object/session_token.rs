//! Session Token Value Objects
//!
//! The token is the bearer secret sent to the client in the session cookie.
//! Storage only ever sees its SHA-256 digest, the [`SessionId`].

use derive_more::Display;
use platform::crypto::{RandomSource, random_array, sha256_hex, to_base64_url};
use std::fmt;

/// Random bytes per token (160 bits)
pub const SESSION_TOKEN_BYTES: usize = 20;

/// Opaque session token (client side)
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a new unguessable token
    pub fn generate(source: &dyn RandomSource) -> Self {
        let bytes: [u8; SESSION_TOKEN_BYTES] = random_array(source);
        Self(to_base64_url(&bytes))
    }

    /// Wrap a token received from a cookie
    pub fn from_cookie(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Storage key for this token
    pub fn session_id(&self) -> SessionId {
        SessionId(sha256_hex(self.0.as_bytes()))
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}

/// Session identifier: lowercase hex SHA-256 of the token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub struct SessionId(String);

impl SessionId {
    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
