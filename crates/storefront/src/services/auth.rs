//! Authentication service.
//!
//! Registration plus the JWT obtain/refresh pair. Logging out is purely
//! client-side: there is no server session to end.

use tracing::instrument;

use crate::api::{ApiClient, ApiError};
use crate::models::{
    AccessToken, AuthResponse, AuthTokens, LoginRequest, MessageResponse, RefreshRequest,
    RegisterRequest,
};

/// Registration and token endpoints.
#[derive(Debug, Clone, Copy)]
pub struct AuthService<'a> {
    api: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns the API error unmodified (e.g. 400 when the email is taken).
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.api.post("/api/users/register/", request).await
    }

    /// Exchange credentials for a JWT pair.
    ///
    /// # Errors
    ///
    /// Returns the API error unmodified (401 for bad credentials).
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthTokens, ApiError> {
        self.api.post("/api/auth/token/", request).await
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// # Errors
    ///
    /// Returns the API error unmodified (401 once the refresh token expired).
    #[instrument(skip_all)]
    pub async fn refresh_token(&self, refresh: &str) -> Result<AccessToken, ApiError> {
        self.api
            .post("/api/auth/token/refresh/", &RefreshRequest { refresh })
            .await
    }

    /// Log out.
    ///
    /// JWT auth keeps no server-side session, so this makes no request;
    /// dropping the stored tokens is the caller's job.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn logout(&self) -> MessageResponse {
        MessageResponse {
            message: "Logged out successfully".to_string(),
        }
    }
}
