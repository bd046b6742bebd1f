//! HTTP Handlers
//!
//! Form actions are selected with the `?/name` query convention, e.g.
//! `POST /demo/lucia/login?/register`.

use axum::Json;
use axum::extract::rejection::FormRejection;
use axum::extract::{Extension, Form, RawQuery, State};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use http::{HeaderValue, StatusCode, header};
use platform::crypto::RandomSource;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    IssuedSession, LoginInput, LoginUseCase, LogoutUseCase, RegisterInput, RegisterUseCase,
    SessionService,
};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{CredentialsForm, LandingResponse, LoginPageResponse, UserSummary};
use crate::presentation::middleware::AuthContext;

/// Shared state for auth handlers
pub struct AuthAppState<R> {
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub rng: Arc<dyn RandomSource>,
}

impl<R> Clone for AuthAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            config: Arc::clone(&self.config),
            rng: Arc::clone(&self.rng),
        }
    }
}

impl<R> AuthAppState<R>
where
    R: SessionRepository + Send + Sync,
{
    pub fn sessions(&self) -> SessionService<R> {
        SessionService::new(self.repo.clone(), self.config.clone(), self.rng.clone())
    }
}

// ============================================================================
// Login Page
// ============================================================================

/// GET /demo/lucia/login
pub async fn login_page<R>(
    State(state): State<AuthAppState<R>>,
    Extension(auth): Extension<AuthContext>,
) -> Response
where
    R: Send + Sync + 'static,
{
    if auth.session.is_some() {
        return found(&state.config.landing_path, None);
    }
    Json(LoginPageResponse::default()).into_response()
}

/// POST /demo/lucia/login?/login | ?/register
pub async fn login_actions<R>(
    State(state): State<AuthAppState<R>>,
    RawQuery(query): RawQuery,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> AuthResult<Response>
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
{
    let action = form_action(query.as_deref());
    if !matches!(action, Some("login" | "register")) {
        return Err(AuthError::UnknownAction(action.map(str::to_string)));
    }

    // An unreadable body carries no fields and fails validation like an empty form
    let form = match form {
        Ok(Form(fields)) => CredentialsForm::from_fields(fields),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Form body rejected");
            CredentialsForm::default()
        }
    };

    let issued = if action == Some("login") {
        let use_case = LoginUseCase::new(state.repo.clone(), state.sessions());
        use_case
            .execute(LoginInput {
                username: form.username,
                password: form.password,
            })
            .await?
    } else {
        let use_case = RegisterUseCase::new(state.repo.clone(), state.sessions(), state.rng.clone());
        use_case
            .execute(RegisterInput {
                username: form.username,
                password: form.password,
            })
            .await?
    };

    let cookie = session_cookie(&state.config, &issued);
    Ok(found(&state.config.landing_path, Some(cookie)))
}

// ============================================================================
// Landing Page
// ============================================================================

/// GET /demo/lucia
pub async fn landing<R>(
    State(state): State<AuthAppState<R>>,
    Extension(auth): Extension<AuthContext>,
) -> Response
where
    R: Send + Sync + 'static,
{
    match auth.session {
        Some(session) => Json(LandingResponse {
            user: UserSummary {
                id: session.user_id.to_string(),
                username: session.user_name.to_string(),
            },
        })
        .into_response(),
        None => found(&state.config.login_path, None),
    }
}

/// POST /demo/lucia?/logout
pub async fn logout_action<R>(
    State(state): State<AuthAppState<R>>,
    RawQuery(query): RawQuery,
    Extension(auth): Extension<AuthContext>,
) -> AuthResult<Response>
where
    R: SessionRepository + Send + Sync + 'static,
{
    let action = form_action(query.as_deref());
    if action != Some("logout") {
        return Err(AuthError::UnknownAction(action.map(str::to_string)));
    }

    let session_id = auth.session.as_ref().map(|s| &s.session_id);
    LogoutUseCase::new(state.sessions()).execute(session_id).await?;

    let cookie = state.config.cookie().build_delete_cookie();
    Ok(found(&state.config.login_path, Some(cookie)))
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Action name from a `?/name` query string
fn form_action(query: Option<&str>) -> Option<&str> {
    query?
        .split('&')
        .map(|pair| pair.split_once('=').map_or(pair, |(key, _)| key))
        .find_map(|key| key.strip_prefix('/'))
}

fn session_cookie(config: &AuthConfig, issued: &IssuedSession) -> String {
    let max_age = (issued.expires_at - Utc::now()).num_seconds();
    config
        .cookie()
        .build_set_cookie(issued.token.as_str(), Some(max_age))
}

/// 302 Found, optionally setting a cookie
fn found(location: &str, cookie: Option<String>) -> Response {
    let mut response = (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response();
    if let Some(cookie) = cookie {
        match cookie.parse::<HeaderValue>() {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::warn!(error = %e, "Session cookie is not a valid header value"),
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_action() {
        assert_eq!(form_action(Some("/login")), Some("login"));
        assert_eq!(form_action(Some("/register")), Some("register"));
        assert_eq!(form_action(Some("/logout=")), Some("logout"));
        assert_eq!(form_action(Some("x=1&/login")), Some("login"));
        assert_eq!(form_action(Some("login")), None);
        assert_eq!(form_action(Some("")), None);
        assert_eq!(form_action(None), None);
    }
}
