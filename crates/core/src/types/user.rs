//! User account wire types.

use serde::{Deserialize, Serialize};

use crate::types::id::UserId;

/// Role string granted to every registered account.
pub const ROLE_USER: &str = "ROLE_USER";
/// Role string marking back-office administrators.
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

/// An account as returned by the auth and admin endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

impl User {
    /// Whether the account carries the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|role| role == ROLE_ADMIN)
    }

    /// Display name: "First Last" when available, else the email address.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            _ => self.email.clone(),
        }
    }
}

/// Response body of `/auth/login` and `/auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Bearer credential for subsequent requests.
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(roles: &[&str]) -> User {
        User {
            id: UserId::new(1),
            email: "a@example.com".to_string(),
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            roles: roles.iter().map(ToString::to_string).collect(),
            enabled: true,
        }
    }

    #[test]
    fn admin_role_is_detected() {
        assert!(user(&[ROLE_USER, ROLE_ADMIN]).is_admin());
        assert!(!user(&[ROLE_USER]).is_admin());
        assert!(!user(&[]).is_admin());
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let mut u = user(&[]);
        assert_eq!(u.display_name(), "Ada Lovelace");
        u.first_name = None;
        u.last_name = None;
        assert_eq!(u.display_name(), "a@example.com");
    }

    #[test]
    fn enabled_defaults_to_true() {
        let u: User = serde_json::from_str(r#"{"id": 1, "email": "a@example.com"}"#).unwrap();
        assert!(u.enabled);
    }
}
