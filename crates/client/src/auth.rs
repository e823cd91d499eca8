//! Authentication service.
//!
//! Handles login, registration, and logout against `/auth/*`, keeps the
//! shared [`Session`] in step, and persists the credential so a restart
//! resumes the previous session without re-prompting.

use std::sync::Arc;

use secrecy::SecretString;
use serde::Serialize;
use shopfront_core::{AuthResponse, User};
use tracing::{instrument, warn};

use crate::api::{ApiClient, ApiError};
use crate::session::Session;
use crate::storage::{self, PersistedAuth, StateStore};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Registration payload for a new customer account.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Client for the authentication endpoints.
#[derive(Clone)]
pub struct AuthClient {
    api: ApiClient,
    session: Session,
    snapshots: Arc<dyn StateStore>,
}

impl AuthClient {
    #[must_use]
    pub fn new(api: ApiClient, session: Session, snapshots: Arc<dyn StateStore>) -> Self {
        Self {
            api,
            session,
            snapshots,
        }
    }

    /// Log in with email and password. On success the session is
    /// authenticated and the credential persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected or the request
    /// fails; the session is left untouched.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let response: AuthResponse = self
            .api
            .post("/auth/login", &LoginRequest { email, password })
            .await?;
        self.adopt(response)
    }

    /// Register a new account. The backend logs the account in as part of
    /// registration, so this behaves like [`Self::login`] on success.
    ///
    /// # Errors
    ///
    /// Returns an error if registration is rejected (e.g. email taken) or
    /// the request fails.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        let response: AuthResponse = self.api.post("/auth/register", request).await?;
        self.adopt(response)
    }

    fn adopt(&self, response: AuthResponse) -> Result<User, ApiError> {
        let user = response.user.clone();
        self.session
            .set_credentials(response.user, SecretString::from(response.token.clone()));
        self.persist_credentials(&response.token, &user);
        Ok(user)
    }

    /// Log out: tell the backend (best effort) and reset to guest. The
    /// local session is cleared even when the backend call fails, since a
    /// dead token is not worth keeping.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        if let Err(e) = self.api.post_no_content("/auth/logout").await {
            warn!(error = %e, "Logout request failed; clearing session anyway");
        }
        self.clear_credentials();
    }

    /// Restore the previous session from the persisted snapshot, if one
    /// exists. Returns the restored user. The token is not validated here;
    /// the first authenticated request will surface a 401 if it expired.
    pub fn restore(&self) -> Option<User> {
        let auth = match self.snapshots.load() {
            Ok(state) => state.and_then(|s| s.auth),
            Err(e) => {
                warn!(error = %e, "Failed to load persisted session");
                None
            }
        }?;

        let user = auth.user.clone();
        self.session
            .set_credentials(auth.user, SecretString::from(auth.token));
        Some(user)
    }

    /// React to a 401 from any service: drop the stale credential so the
    /// app falls back to guest mode.
    pub fn handle_unauthorized(&self) {
        warn!("Credential rejected by backend; resetting to guest");
        self.clear_credentials();
    }

    fn persist_credentials(&self, token: &str, user: &User) {
        let persisted = PersistedAuth {
            token: token.to_string(),
            user: user.clone(),
        };
        if let Err(e) = storage::update(self.snapshots.as_ref(), |state| {
            state.auth = Some(persisted);
        }) {
            warn!(error = %e, "Failed to persist session credential");
        }
    }

    fn clear_credentials(&self) {
        self.session.clear();
        if let Err(e) = storage::update(self.snapshots.as_ref(), |state| {
            state.auth = None;
        }) {
            warn!(error = %e, "Failed to clear persisted credential");
        }
    }
}
