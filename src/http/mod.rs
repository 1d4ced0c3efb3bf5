//! HTTP client adapter.
//!
//! Every backend call goes through [`HttpClient`]. It attaches the bearer token,
//! classifies failures and performs their side effects:
//!
//! - 401: token cleared, session expired, one forced navigation to login
//! - >= 500: generic server-error notification
//! - other 4xx with a structured `detail`: that message, verbatim
//! - no response: unreachable notification
//!
//! There are no retries here; one failed request yields one notification and one
//! error.

use std::sync::Arc;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::SessionHandle;
use crate::config::Config;
use crate::errors::{ClientError, ErrorBody};
use crate::notify::{Notification, Notifier, SERVER_ERROR_MESSAGE, UNREACHABLE_MESSAGE};
use crate::routes::{Navigator, Route};
use crate::session::TokenStore;

/// Header carrying a per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Collaborators the adapter reports to.
#[derive(Clone)]
pub struct Hooks {
    pub tokens: Arc<dyn TokenStore>,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
    pub session: SessionHandle,
}

#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    hooks: Hooks,
}

impl HttpClient {
    pub fn new(config: &Config, hooks: Hooks) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("court-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            hooks,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Start a request with the bearer token and a request id attached.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.decorate(self.client.request(method, self.url(path)))
    }

    /// Like [`request`](Self::request), but each segment is percent-encoded on its
    /// own, so user input can never add path segments, a query or a fragment.
    pub fn request_segments(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<RequestBuilder, ClientError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::Config(format!("Invalid API URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::Config(format!("API URL cannot take a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(self.decorate(self.client.request(method, url)))
    }

    fn decorate(&self, builder: RequestBuilder) -> RequestBuilder {
        let mut builder = builder.header(REQUEST_ID_HEADER, Uuid::new_v4().to_string());

        if let Some(token) = self.hooks.tokens.token() {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => builder = builder.header(AUTHORIZATION, value),
                Err(_) => tracing::warn!("stored token is not a valid header value; sending without it"),
            }
        }

        builder
    }

    pub async fn get<T, Q>(&self, path: &str, query: &Q) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    pub async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub async fn put_json<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn post_form<T, F>(&self, path: &str, form: &F) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        F: Serialize + ?Sized,
    {
        self.send(self.request(Method::POST, path).form(form)).await
    }

    pub async fn post_multipart<T>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path).multipart(form))
            .await
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.send(self.request(Method::POST, path)).await
    }

    /// POST with parameters in the query string and no body.
    pub async fn post_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(self.request(Method::POST, path).query(query)).await
    }

    /// GET a raw body, e.g. a file download.
    pub async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ClientError> {
        self.execute(self.request(Method::GET, path))
            .await
            .map(|(_, body)| body)
    }

    /// Send a prepared request and decode a JSON success body.
    pub async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ClientError> {
        let (path, body) = self.execute(builder).await?;
        serde_json::from_slice(&body).map_err(|e| {
            tracing::error!(%path, "unexpected response shape: {}", e);
            ClientError::Decode(format!("Unexpected response from {}: {}", path, e))
        })
    }

    /// Send a prepared request; returns the request path and the success body.
    async fn execute(&self, builder: RequestBuilder) -> Result<(String, Vec<u8>), ClientError> {
        let request = builder.build().map_err(ClientError::from)?;
        let method = request.method().clone();
        let path = request.url().path().to_string();
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        tracing::debug!(%method, %path, %request_id, "sending request");

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(%method, %path, %request_id, "request failed: {}", e);
                self.hooks
                    .notifier
                    .notify(Notification::error(UNREACHABLE_MESSAGE));
                return Err(ClientError::Transport(format!("Request failed: {}", e)));
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(%method, %path, %request_id, "failed to read body: {}", e);
                self.hooks
                    .notifier
                    .notify(Notification::error(UNREACHABLE_MESSAGE));
                return Err(ClientError::Transport(format!(
                    "Failed to read response body: {}",
                    e
                )));
            }
        };

        tracing::debug!(%method, %path, %request_id, status = status.as_u16(), "response received");

        if status.is_success() {
            return Ok((path, body.to_vec()));
        }

        Err(self.fail(status, &body, &path))
    }

    /// Classify a failed response and perform its side effects.
    fn fail(&self, status: StatusCode, body: &[u8], path: &str) -> ClientError {
        let detail = ErrorBody::parse(body).and_then(|b| b.message());

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(%path, "session rejected by backend, redirecting to login");
            if let Err(e) = self.hooks.tokens.clear() {
                tracing::warn!("failed to clear token: {}", e);
            }
            // Concurrent 401s for one dead session redirect once.
            if self.hooks.session.expire() {
                self.hooks.navigator.navigate(Route::Login);
            }
            return ClientError::Unauthorized(
                detail.unwrap_or_else(|| "Session expired".to_string()),
            );
        }

        if status.is_server_error() {
            tracing::error!(%path, status = status.as_u16(), "server error");
            self.hooks
                .notifier
                .notify(Notification::error(SERVER_ERROR_MESSAGE));
            return ClientError::Server {
                status: status.as_u16(),
                message: detail.unwrap_or_else(|| status_text(status)),
            };
        }

        match detail {
            Some(message) => {
                self.hooks.notifier.notify(Notification::error(message.clone()));
                ClientError::Rejected {
                    status: status.as_u16(),
                    message,
                }
            }
            None => ClientError::Rejected {
                status: status.as_u16(),
                message: status_text(status),
            },
        }
    }
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotificationLog;
    use crate::routes::NavigationLog;
    use crate::session::MemoryTokenStore;

    struct Harness {
        client: HttpClient,
        tokens: Arc<MemoryTokenStore>,
        notes: Arc<NotificationLog>,
        nav: Arc<NavigationLog>,
        session: SessionHandle,
    }

    fn harness() -> Harness {
        let tokens = Arc::new(MemoryTokenStore::with_token("tok"));
        let notes = Arc::new(NotificationLog::new());
        let nav = Arc::new(NavigationLog::new());
        let session = SessionHandle::new();
        let config = Config {
            api_url: "http://backend.test/api/".to_string(),
            ..Config::default()
        };
        let client = HttpClient::new(
            &config,
            Hooks {
                tokens: tokens.clone(),
                notifier: notes.clone(),
                navigator: nav.clone(),
                session: session.clone(),
            },
        )
        .unwrap();
        Harness {
            client,
            tokens,
            notes,
            nav,
            session,
        }
    }

    #[test]
    fn test_url_join() {
        let h = harness();
        assert_eq!(h.client.url("/cases/3"), "http://backend.test/api/cases/3");
        assert_eq!(h.client.url("cases"), "http://backend.test/api/cases");
    }

    #[test]
    fn test_request_carries_bearer_and_id() {
        let h = harness();
        let request = h.client.request(Method::GET, "/auth/me").build().unwrap();
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer tok");
        assert!(request.headers().contains_key(REQUEST_ID_HEADER));

        h.tokens.clear().unwrap();
        let request = h.client.request(Method::GET, "/auth/me").build().unwrap();
        assert!(!request.headers().contains_key(AUTHORIZATION));
    }

    #[test]
    fn test_segments_are_encoded() {
        let h = harness();
        let request = h
            .client
            .request_segments(Method::GET, &["cases", "search", "CIV/2024?x#1"])
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "http://backend.test/api/cases/search/CIV%2F2024%3Fx%231"
        );
        assert!(request.url().query().is_none());
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer tok");
    }

    #[test]
    fn test_unauthorized_side_effects() {
        let h = harness();
        let err = h.client.fail(StatusCode::UNAUTHORIZED, b"{}", "/cases");

        assert_eq!(err, ClientError::Unauthorized("Session expired".into()));
        assert!(h.tokens.token().is_none());
        assert_eq!(h.nav.count(&Route::Login), 1);
        assert_eq!(h.session.snapshot(), crate::auth::AuthState::Unauthenticated);
        assert!(h.notes.is_empty());

        h.tokens.store("tok-2").unwrap();
        h.client.fail(StatusCode::UNAUTHORIZED, b"", "/judges");
        assert!(h.tokens.token().is_none());
        assert_eq!(h.nav.count(&Route::Login), 1);
    }

    #[test]
    fn test_server_error_is_generic() {
        let h = harness();
        let err = h.client.fail(
            StatusCode::INTERNAL_SERVER_ERROR,
            br#"{"detail": "Traceback ..."}"#,
            "/scheduling/find-slots",
        );

        assert_eq!(err.status(), Some(500));
        let notes = h.notes.snapshot();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].message, SERVER_ERROR_MESSAGE);
        assert_eq!(h.tokens.token().as_deref(), Some("tok"));
    }

    #[test]
    fn test_detail_surfaced_verbatim() {
        let h = harness();
        let err = h.client.fail(
            StatusCode::FORBIDDEN,
            br#"{"detail": "Insufficient permissions"}"#,
            "/cases/1/status",
        );
        assert_eq!(err.message(), "Insufficient permissions");
        assert_eq!(h.notes.snapshot()[0].message, "Insufficient permissions");
    }

    #[test]
    fn test_bare_client_error_is_silent() {
        let h = harness();
        let err = h.client.fail(StatusCode::NOT_FOUND, b"", "/cases/999");
        assert_eq!(err.message(), "Not Found");
        assert!(h.notes.is_empty());
    }
}
