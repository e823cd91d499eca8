//! REST API client for the Shopfront backend.
//!
//! A thin `reqwest` wrapper shared by all services: JSON bodies, a fixed
//! per-request timeout, a bearer credential injected from the [`Session`]
//! when one is held, and a `X-Request-Id` correlation header on every call.
//!
//! Error responses are expected to carry a JSON body of the form
//! `{ "message": "..." }`; the message is surfaced verbatim to callers so
//! the notification layer can show it.

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error};
use url::Url;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::session::Session;

/// Errors that can occur when calling the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure, including request timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Backend rejected the credential. The application layer reacts by
    /// clearing session state; the cart subsystem itself does not.
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Response body could not be parsed.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// Message to show the user: the backend's message when present, else
    /// a generic fallback.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } | Self::Unauthorized { message } if !message.is_empty() => {
                message.clone()
            }
            Self::Unauthorized { .. } => crate::notify::messages::UNAUTHORIZED.to_string(),
            _ => crate::notify::messages::GENERIC_ERROR.to_string(),
        }
    }
}

/// Pull the `message` field out of an error body, if there is one.
fn extract_message(body: &str) -> Option<String> {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: String,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|parsed| parsed.message)
}

/// Client for the Shopfront REST backend.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: Url,
    session: Session,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig, session: Session) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.api_base_url.clone(),
                session,
            }),
        })
    }

    /// Build the full URL for an API path like `/cart/items`.
    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.inner.base_url.clone();
        let joined = format!("{}{}", url.path().trim_end_matches('/'), path);
        url.set_path(&joined);
        url
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&(impl Serialize + ?Sized)>,
        query: Option<&[(String, String)]>,
    ) -> Result<T, ApiError> {
        let text = self.send(method, path, body, query).await?;
        serde_json::from_str(&text).map_err(|e| {
            error!(%path, error = %e, "Failed to parse API response");
            ApiError::Parse(e)
        })
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&(impl Serialize + ?Sized)>,
        query: Option<&[(String, String)]>,
    ) -> Result<String, ApiError> {
        let request_id = Uuid::new_v4();
        let url = self.endpoint(path);
        debug!(%method, %path, %request_id, "API request");

        let mut request = self
            .inner
            .http
            .request(method, url)
            .header("X-Request-Id", request_id.to_string());

        if let Some(token) = self.inner.session.bearer_token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(query) = query {
            request = request.query(query);
        }

        let response = request.send().await?;
        let status = response.status();

        // Read the body as text first for better error diagnostics.
        let text = response.text().await?;

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized {
                message: extract_message(&text).unwrap_or_default(),
            });
        }

        if !status.is_success() {
            let message = extract_message(&text).unwrap_or_default();
            error!(%status, %path, %request_id, "API request failed");
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(text)
    }

    /// `GET` a JSON resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(Method::GET, path, None::<&()>, None).await
    }

    /// `GET` a JSON resource with query parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ApiError> {
        self.execute(Method::GET, path, None::<&()>, Some(query))
            .await
    }

    /// `POST` a JSON body and parse the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + ?Sized),
    ) -> Result<T, ApiError> {
        self.execute(Method::POST, path, Some(body), None).await
    }

    /// `PUT` a JSON body and parse the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + ?Sized),
    ) -> Result<T, ApiError> {
        self.execute(Method::PUT, path, Some(body), None).await
    }

    /// `DELETE` a resource and parse the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(Method::DELETE, path, None::<&()>, None).await
    }

    /// `POST` without caring about the response body (e.g. logout).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn post_no_content(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::POST, path, None::<&()>, None).await?;
        Ok(())
    }

    /// `DELETE` without caring about the response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_no_content(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, path, None::<&()>, None).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_message_is_extracted() {
        assert_eq!(
            extract_message(r#"{"message": "Insufficient stock available"}"#),
            Some("Insufficient stock available".to_string())
        );
        assert_eq!(extract_message("<html>502</html>"), None);
        assert_eq!(extract_message(""), None);
    }

    #[test]
    fn user_message_prefers_backend_message() {
        let err = ApiError::Api {
            status: 409,
            message: "Insufficient stock available".to_string(),
        };
        assert_eq!(err.user_message(), "Insufficient stock available");

        let err = ApiError::Api {
            status: 502,
            message: String::new(),
        };
        assert_eq!(err.user_message(), crate::notify::messages::GENERIC_ERROR);

        let err = ApiError::Unauthorized {
            message: String::new(),
        };
        assert_eq!(err.user_message(), crate::notify::messages::UNAUTHORIZED);
    }

    #[test]
    fn endpoint_joins_base_path() {
        let config = ClientConfig {
            api_base_url: Url::parse("http://localhost:8080/api").unwrap(),
            request_timeout: std::time::Duration::from_secs(30),
            state_path: std::path::PathBuf::from("/tmp/state.json"),
        };
        let client = ApiClient::new(&config, Session::new()).unwrap();

        assert_eq!(
            client.endpoint("/cart/items").as_str(),
            "http://localhost:8080/api/cart/items"
        );
        assert_eq!(
            client.endpoint("/cart").as_str(),
            "http://localhost:8080/api/cart"
        );
    }
}
