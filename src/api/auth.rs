//! Auth endpoints.

use crate::errors::ClientError;
use crate::http::HttpClient;
use crate::models::{NewUser, Token, User};

use super::NO_PARAMS;

#[derive(Clone)]
pub struct AuthApi {
    http: HttpClient,
}

impl AuthApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// POST /auth/token - form-encoded credentials for a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<Token, ClientError> {
        self.http
            .post_form("/auth/token", &[("username", email), ("password", password)])
            .await
    }

    /// POST /auth/register
    pub async fn register(&self, user: &NewUser) -> Result<User, ClientError> {
        self.http.post_json("/auth/register", user).await
    }

    /// GET /auth/me - the user the current token belongs to.
    pub async fn me(&self) -> Result<User, ClientError> {
        self.http.get("/auth/me", NO_PARAMS).await
    }
}
