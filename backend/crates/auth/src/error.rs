//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! `Display` is the internal (logged) description. What the client sees is
//! [`AuthError::public_message`], which never carries internal causes.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Shared by the unknown-user and wrong-password cases
pub const INCORRECT_CREDENTIALS_MESSAGE: &str = "Incorrect username or password";

/// Generic server-side failure message
pub const GENERIC_FAILURE_MESSAGE: &str = "An error has occurred";

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password failed validation (message is client-facing)
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),

    /// Unknown user name or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Stored password hash is not `salt:digest`
    #[error("Stored password hash is malformed")]
    MalformedPasswordHash,

    /// Unique constraint on user name rejected an insert
    #[error("User name already exists")]
    UserNameTaken,

    /// Registration could not be completed
    #[error("Registration failed: {0}")]
    RegistrationFailed(#[source] Box<AuthError>),

    /// Action requires a valid session
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Form action name did not match any action
    #[error("Unknown form action: {0:?}")]
    UnknownAction(Option<String>),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidInput(_) | AuthError::InvalidCredentials => ErrorKind::BadRequest,
            AuthError::NotAuthenticated => ErrorKind::Unauthorized,
            AuthError::UnknownAction(_) => ErrorKind::NotFound,
            AuthError::MalformedPasswordHash
            | AuthError::UserNameTaken
            | AuthError::RegistrationFailed(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Client-facing message
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::InvalidInput(message) => *message,
            AuthError::InvalidCredentials => INCORRECT_CREDENTIALS_MESSAGE,
            AuthError::MalformedPasswordHash => "Stored password hash is invalid",
            AuthError::NotAuthenticated => "Not authenticated",
            AuthError::UnknownAction(_) => "No action with that name",
            AuthError::UserNameTaken
            | AuthError::RegistrationFailed(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => GENERIC_FAILURE_MESSAGE,
        }
    }

    /// HTTP status code as a number
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.public_message())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::MalformedPasswordHash => {
                tracing::error!("Stored password hash is not in salt:digest form");
            }
            AuthError::RegistrationFailed(cause) => {
                tracing::error!(error = %cause, "Registration failed");
            }
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::UserNameTaken => {
                tracing::error!("User name uniqueness violation reached the client");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<platform::password::PasswordHashError> for AuthError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        match err {
            platform::password::PasswordHashError::InvalidHashFormat => {
                AuthError::MalformedPasswordHash
            }
            platform::password::PasswordHashError::HashingFailed(msg) => AuthError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_failures_share_one_message() {
        assert_eq!(
            AuthError::InvalidCredentials.public_message(),
            "Incorrect username or password"
        );
        assert_eq!(AuthError::InvalidCredentials.status_code(), 400);
    }

    #[test]
    fn test_server_errors_do_not_leak_causes() {
        let err = AuthError::RegistrationFailed(Box::new(AuthError::UserNameTaken));
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.public_message(), "An error has occurred");
        assert_eq!(err.to_app_error().message(), "An error has occurred");

        let err = AuthError::Internal("connection reset by peer".to_string());
        assert_eq!(err.to_app_error().message(), "An error has occurred");
    }

    #[test]
    fn test_malformed_hash_is_distinct_server_error() {
        let err = AuthError::MalformedPasswordHash;
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.public_message(), "Stored password hash is invalid");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::InvalidInput("Invalid username").status_code(), 400);
        assert_eq!(AuthError::NotAuthenticated.status_code(), 401);
        assert_eq!(AuthError::UnknownAction(None).status_code(), 404);
    }

    #[test]
    fn test_hash_error_conversion() {
        use platform::password::PasswordHashError;

        let err: AuthError = PasswordHashError::InvalidHashFormat.into();
        assert!(matches!(err, AuthError::MalformedPasswordHash));

        let err: AuthError = PasswordHashError::HashingFailed("bad params".to_string()).into();
        assert!(matches!(err, AuthError::Internal(_)));
    }
}
