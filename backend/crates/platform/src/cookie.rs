//! Cookie Management Infrastructure
//!
//! Set-Cookie construction and Cookie header parsing.

use axum::http::{HeaderMap, HeaderValue, header};

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Cookie configuration
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "session".to_string(),
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
        }
    }
}

impl CookieConfig {
    /// Build Set-Cookie header value
    pub fn build_set_cookie(&self, value: &str, max_age_secs: Option<i64>) -> String {
        let mut cookie = format!("{}={}", self.name, value);

        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        cookie.push_str(&format!("; Path={}", self.path));

        if let Some(max_age) = max_age_secs {
            cookie.push_str(&format!("; Max-Age={}", max_age.max(0)));
        }

        cookie
    }

    /// Build Set-Cookie header for deletion (expired)
    pub fn build_delete_cookie(&self) -> String {
        self.build_set_cookie("", Some(0))
    }

    /// Whether a Set-Cookie value targets this cookie
    pub fn is_set_cookie_for(&self, set_cookie: &HeaderValue) -> bool {
        set_cookie
            .to_str()
            .ok()
            .and_then(|value| value.split_once('='))
            .is_some_and(|(name, _)| name.trim() == self.name)
    }
}

/// Extract a cookie value from headers
///
/// Every `Cookie` header is searched; the first matching pair wins.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;

            if key == name {
                Some(value.to_string())
            } else {
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CookieConfig {
        CookieConfig {
            name: "auth-session".to_string(),
            ..CookieConfig::default()
        }
    }

    #[test]
    fn test_cookie_config_build() {
        let cookie = config().build_set_cookie("token123", Some(3600));
        assert!(cookie.starts_with("auth-session=token123"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=3600"));
    }

    #[test]
    fn test_insecure_cookie_and_clamped_max_age() {
        let config = CookieConfig {
            secure: false,
            ..config()
        };
        let cookie = config.build_set_cookie("v", Some(-5));
        assert!(!cookie.contains("Secure"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_delete_cookie() {
        let cookie = config().build_delete_cookie();
        assert!(cookie.starts_with("auth-session=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_is_set_cookie_for() {
        let config = config();
        let ours = HeaderValue::from_str(&config.build_set_cookie("x", None)).unwrap();
        let other = HeaderValue::from_static("theme=dark; Path=/");
        assert!(config.is_set_cookie_for(&ours));
        assert!(!config.is_set_cookie_for(&other));
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; auth-session=abc123; other=xyz"),
        );

        assert_eq!(
            extract_cookie(&headers, "auth-session"),
            Some("abc123".to_string())
        );
        assert_eq!(extract_cookie(&headers, "foo"), Some("bar".to_string()));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }
}
