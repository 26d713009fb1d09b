//! The customer's identity as reported by the host.
use serde::{Deserialize, Serialize};

/// Language assumed when the host does not report one.
pub const DEFAULT_LANGUAGE: &str = "ru";

/// User record exactly as the host injects it (`initDataUnsafe.user`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HostUser {
    pub id: i64,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
}

/// Represents the customer using the app.
///
/// Derived once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub full_name: String,
    pub language_code: String,
}

impl From<HostUser> for Identity {
    fn from(user: HostUser) -> Self {
        let last_name = user.last_name.unwrap_or_default();
        let full_name = if last_name.is_empty() {
            user.first_name.clone()
        } else {
            format!("{} {}", user.first_name, last_name)
        };
        Self {
            id: user.id.to_string(),
            first_name: user.first_name,
            last_name,
            username: user.username.unwrap_or_default(),
            full_name,
            language_code: user
                .language_code
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        }
    }
}

/// Exact-match admin check.
///
/// This only decides what the UI offers; the backend must authorize every admin write
/// on its own.
pub fn is_admin(identity: Option<&Identity>, admin_id: &str) -> bool {
    identity.is_some_and(|identity| identity.id == admin_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host_user(id: i64) -> HostUser {
        HostUser {
            id,
            first_name: "Anna".into(),
            last_name: None,
            username: None,
            language_code: None,
        }
    }

    #[test]
    fn test_identity_defaults() {
        let identity = Identity::from(host_user(42));

        assert_eq!(identity.id, "42");
        assert_eq!(identity.full_name, "Anna");
        assert_eq!(identity.last_name, "");
        assert_eq!(identity.username, "");
        assert_eq!(identity.language_code, "ru");
    }

    #[test]
    fn test_full_name_includes_last_name() {
        let mut user = host_user(42);
        user.last_name = Some("Petrova".into());
        user.language_code = Some("en".into());

        let identity = Identity::from(user);
        assert_eq!(identity.full_name, "Anna Petrova");
        assert_eq!(identity.language_code, "en");
    }

    #[test]
    fn test_admin_is_exact_id_match() {
        let admin = Identity::from(host_user(123456789));
        let other = Identity::from(host_user(12345678));

        assert!(is_admin(Some(&admin), "123456789"));
        assert!(!is_admin(Some(&other), "123456789"));
        assert!(!is_admin(Some(&admin), " 123456789"));
        assert!(!is_admin(None, "123456789"));
        assert!(!is_admin(None, ""));
    }

    #[test]
    fn test_host_user_parses_host_payload() {
        let json = r#"{"id":7,"first_name":"Ivan","username":"ivan_b"}"#;
        let user: HostUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.username.as_deref(), Some("ivan_b"));
    }
}
