//! API DTOs (Data Transfer Objects)

use serde::Serialize;

// ============================================================================
// Form Actions
// ============================================================================

/// Login / register form body
///
/// Fields stay optional so a missing field is reported as invalid input
/// rather than a deserialization rejection.
#[derive(Debug, Clone, Default)]
pub struct CredentialsForm {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl CredentialsForm {
    /// Collect from decoded `key=value` pairs; the first value of a repeated key wins
    pub fn from_fields(fields: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut form = Self::default();
        for (key, value) in fields {
            let slot = match key.as_str() {
                "username" => &mut form.username,
                "password" => &mut form.password,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        form
    }
}

// ============================================================================
// Pages
// ============================================================================

/// Login page data (nothing to show)
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoginPageResponse {}

/// Landing page data for an authenticated user
#[derive(Debug, Clone, Serialize)]
pub struct LandingResponse {
    pub user: UserSummary,
}

/// Public view of a user
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
}


#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(fields: &[(&str, &str)]) -> Vec<(String, String)> {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_first_value_wins() {
        let form = CredentialsForm::from_fields(pairs(&[
            ("username", "alice123"),
            ("username", "bob"),
            ("password", "secret1"),
            ("password", "other12"),
        ]));
        assert_eq!(form.username.as_deref(), Some("alice123"));
        assert_eq!(form.password.as_deref(), Some("secret1"));
    }

    #[test]
    fn test_missing_and_unknown_fields() {
        let form = CredentialsForm::from_fields(pairs(&[("remember", "on"), ("username", "")]));
        assert_eq!(form.username.as_deref(), Some(""));
        assert_eq!(form.password, None);
    }
}
