//! Authentication context.
//!
//! Holds the current session as a three-state machine:
//!
//! ```text
//! Loading ──token valid──▶ Authenticated ──logout / 401──▶ Unauthenticated
//!    └──no token / invalid───────────────────────────────▶ Unauthenticated
//! ```
//!
//! Route guards read snapshots; only [`AuthContext`] and the HTTP adapter's 401 path
//! move the state.

use std::sync::Arc;

use tokio::sync::watch;

use crate::api::AuthApi;
use crate::errors::ClientError;
use crate::models::User;
use crate::session::TokenStore;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    /// Checking for an existing session.
    Loading,
    Authenticated(User),
    Unauthenticated,
}

impl AuthState {
    pub fn user(&self) -> Option<&User> {
        match self {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, AuthState::Loading)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }
}

/// Shared handle on the session state.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    state: Arc<watch::Sender<AuthState>>,
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionHandle {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(AuthState::Loading);
        Self {
            state: Arc::new(tx),
        }
    }

    pub fn snapshot(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub(crate) fn set(&self, next: AuthState) {
        let previous = self.state.send_replace(next);
        tracing::debug!(from = ?state_name(&previous), to = ?state_name(&self.state.borrow()), "auth transition");
    }

    /// Drop the session after the backend rejected its token.
    ///
    /// Returns whether the state changed.
    pub(crate) fn expire(&self) -> bool {
        let changed = self.state.send_if_modified(|state| {
            if matches!(state, AuthState::Unauthenticated) {
                false
            } else {
                *state = AuthState::Unauthenticated;
                true
            }
        });
        if changed {
            tracing::info!("session expired");
        }
        changed
    }
}

fn state_name(state: &AuthState) -> &'static str {
    match state {
        AuthState::Loading => "loading",
        AuthState::Authenticated(_) => "authenticated",
        AuthState::Unauthenticated => "unauthenticated",
    }
}

/// Owns the session lifecycle: mount, login, logout.
pub struct AuthContext {
    session: SessionHandle,
    api: AuthApi,
    tokens: Arc<dyn TokenStore>,
}

impl AuthContext {
    pub fn new(session: SessionHandle, api: AuthApi, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            session,
            api,
            tokens,
        }
    }

    pub fn state(&self) -> AuthState {
        self.session.snapshot()
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// Resolve the initial state from the stored token.
    pub async fn mount(&self) -> AuthState {
        if self.tokens.token().is_none() {
            self.session.set(AuthState::Unauthenticated);
            return self.state();
        }

        self.session.set(AuthState::Loading);
        match self.api.me().await {
            Ok(user) => {
                tracing::info!(user = %user.email, "restored session");
                self.session.set(AuthState::Authenticated(user));
            }
            Err(e) => {
                tracing::warn!("stored token rejected: {}", e);
                if let Err(e) = self.tokens.clear() {
                    tracing::warn!("failed to clear token: {}", e);
                }
                self.session.set(AuthState::Unauthenticated);
            }
        }
        self.state()
    }

    /// Exchange credentials for a token, store it, then load the profile.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ClientError> {
        let result = self.try_login(email, password).await;
        match &result {
            Ok(user) => {
                tracing::info!(user = %user.email, "logged in");
                self.session.set(AuthState::Authenticated(user.clone()));
            }
            Err(e) => {
                tracing::warn!("login failed: {}", e);
                self.session.set(AuthState::Unauthenticated);
            }
        }
        result
    }

    async fn try_login(&self, email: &str, password: &str) -> Result<User, ClientError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ClientError::InvalidInput(
                "Email and password are required".to_string(),
            ));
        }
        let token = self.api.login(email, password).await?;
        self.tokens.store(&token.access_token)?;
        self.api.me().await
    }

    pub fn logout(&self) -> Result<(), ClientError> {
        let cleared = self.tokens.clear();
        self.session.set(AuthState::Unauthenticated);
        tracing::info!("logged out");
        cleared
    }
}
