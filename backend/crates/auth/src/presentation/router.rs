//! Auth Router

use axum::{Router, middleware, routing::get};
use platform::crypto::RandomSource;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::session_middleware;

/// Create the Auth router for any repository implementation
///
/// Serves the login page and its actions at `config.login_path` and the
/// landing page with the logout action at `config.landing_path`.
pub fn auth_router<R>(repo: Arc<R>, config: AuthConfig, rng: Arc<dyn RandomSource>) -> Router
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo,
        config: Arc::new(config),
        rng,
    };

    Router::new()
        .route(
            &state.config.login_path,
            get(handlers::login_page::<R>).post(handlers::login_actions::<R>),
        )
        .route(
            &state.config.landing_path,
            get(handlers::landing::<R>).post(handlers::logout_action::<R>),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware::<R>,
        ))
        .with_state(state)
}
