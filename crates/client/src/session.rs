//! Authenticated session state.
//!
//! A `Session` holds the logged-in user and the bearer credential. It is
//! cheaply cloneable and shared between the API client (which reads the
//! token per request) and the cart synchronizer (which reads the
//! authenticated flag to pick a strategy). Guest visitors simply have no
//! token set.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use secrecy::{ExposeSecret, SecretString};
use shopfront_core::User;

/// Shared session handle.
#[derive(Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<SessionState>>,
}

#[derive(Default)]
struct SessionState {
    user: Option<User>,
    token: Option<SecretString>,
}

impl Session {
    /// Create an unauthenticated (guest) session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether the session holds a bearer credential.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read().token.is_some()
    }

    /// Whether the logged-in user carries the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.read().user.as_ref().is_some_and(User::is_admin)
    }

    /// The logged-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.read().user.clone()
    }

    /// The bearer token value for the `Authorization` header.
    #[must_use]
    pub fn bearer_token(&self) -> Option<String> {
        self.read()
            .token
            .as_ref()
            .map(|token| token.expose_secret().to_string())
    }

    /// Install credentials after a successful login or register.
    pub fn set_credentials(&self, user: User, token: SecretString) {
        let mut state = self.write();
        state.user = Some(user);
        state.token = Some(token);
    }

    /// Drop the session back to guest.
    pub fn clear(&self) {
        let mut state = self.write();
        state.user = None;
        state.token = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_core::{UserId, user::ROLE_ADMIN};

    fn user() -> User {
        User {
            id: UserId::new(1),
            email: "a@example.com".to_string(),
            first_name: None,
            last_name: None,
            roles: vec![ROLE_ADMIN.to_string()],
            enabled: true,
        }
    }

    #[test]
    fn session_starts_as_guest() {
        let session = Session::new();
        assert!(!session.is_authenticated());
        assert!(session.bearer_token().is_none());
        assert!(session.user().is_none());
    }

    #[test]
    fn credentials_round_trip() {
        let session = Session::new();
        session.set_credentials(user(), SecretString::from("jwt-token"));

        assert!(session.is_authenticated());
        assert!(session.is_admin());
        assert_eq!(session.bearer_token().as_deref(), Some("jwt-token"));

        session.clear();
        assert!(!session.is_authenticated());
        assert!(!session.is_admin());
    }
}
