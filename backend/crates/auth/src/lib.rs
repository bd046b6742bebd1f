//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Registration and login with username + password (form actions)
//! - Server-side sessions with cookie-based tokens
//! - Sliding session expiry (30 days, renewed in the last 15)
//!
//! ## Security Model
//! - Passwords hashed with scrypt (N=16384, r=8, p=1) and a per-user salt
//! - Only the SHA-256 of a session token is stored
//! - Unknown user and wrong password produce the same response
//! - Randomness comes from an injected source

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{memory::MemoryAuthRepository, postgres::PgAuthRepository};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
