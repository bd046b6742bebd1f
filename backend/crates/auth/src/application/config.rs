//! Application Configuration
//!
//! Configuration for the Auth application layer.

use chrono::Duration;
use platform::cookie::CookieConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session lifetime (30 days)
    pub session_ttl: Duration,
    /// Renew once less than this remains (15 days)
    pub session_renew_threshold: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Redirect target after login, registration, or when already signed in
    pub landing_path: String,
    /// Redirect target when not signed in and after logout
    pub login_path: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "auth-session".to_string(),
            session_ttl: Duration::days(30),
            session_renew_threshold: Duration::days(15),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            landing_path: "/demo/lucia".to_string(),
            login_path: "/demo/lucia/login".to_string(),
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Default::default()
        }
    }

    /// Session cookie settings
    pub fn cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.session_cookie_name, "auth-session");
        assert_eq!(config.session_ttl, Duration::days(30));
        assert_eq!(config.session_renew_threshold, Duration::days(15));
        assert!(config.cookie_secure);
    }

    #[test]
    fn test_development_cookie_is_not_secure() {
        let cookie = AuthConfig::development().cookie();
        assert!(!cookie.secure);
        assert!(cookie.http_only);
        assert_eq!(cookie.name, "auth-session");
        assert_eq!(cookie.path, "/");
    }
}
