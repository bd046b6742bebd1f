//! Session Middleware
//!
//! Resolves the session cookie on every request, exposes the result to
//! handlers as an [`AuthContext`] extension, and keeps the cookie in step
//! with the stored session.

use axum::body::Body;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use http::{HeaderValue, Request, header};

use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{
    session_token::{SessionId, SessionToken},
    user_id::UserId,
    user_name::UserName,
};
use crate::presentation::handlers::AuthAppState;

/// The signed-in session attached to a request
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub user_name: UserName,
    pub expires_at: DateTime<Utc>,
}

/// Authentication state stored in request extensions
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    pub session: Option<CurrentSession>,
}

/// Validate the session cookie, if any
///
/// Valid: the cookie is re-sent with the (possibly renewed) expiry.
/// Unknown or expired: a deletion cookie is sent. A session cookie set by
/// the handler itself always wins.
pub async fn session_middleware<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    R: UserRepository + SessionRepository + Send + Sync + 'static,
{
    let cookie_config = state.config.cookie();

    let Some(token) = platform::cookie::extract_cookie(req.headers(), &cookie_config.name) else {
        req.extensions_mut().insert(AuthContext::default());
        return next.run(req).await;
    };
    let token = SessionToken::from_cookie(token);

    let validated = match state.sessions().validate_session_token(&token).await {
        Ok(validated) => validated,
        Err(e) => return e.into_response(),
    };

    let (context, cookie) = match validated {
        Some(v) => {
            let max_age = v.session.remaining_secs_at(Utc::now());
            let context = AuthContext {
                session: Some(CurrentSession {
                    session_id: v.session.session_id,
                    user_id: v.user.user_id,
                    user_name: v.user.user_name,
                    expires_at: v.session.expires_at,
                }),
            };
            (context, cookie_config.build_set_cookie(token.as_str(), Some(max_age)))
        }
        None => (AuthContext::default(), cookie_config.build_delete_cookie()),
    };

    req.extensions_mut().insert(context);
    let mut response = next.run(req).await;

    let handler_set_cookie = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .any(|value| cookie_config.is_set_cookie_for(value));

    if !handler_set_cookie {
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::warn!(error = %e, "Session cookie is not a valid header value"),
        }
    }

    response
}
