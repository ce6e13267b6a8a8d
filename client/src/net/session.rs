//! Typed session endpoints.
//!
//! Thin wrappers over [`ApiClient`]: each call forwards to one endpoint, logs
//! a failure with the operation name, and returns the error unchanged. No
//! retries, no caching.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use super::api::ApiClient;
use super::error::ApiError;
use super::types::{HealthResponse, LoginRequest, LoginResponse, UserId, UserInfo, UserPermissions, UserProfile};
use crate::state::auth::SessionContext;

pub const LOGIN_PATH: &str = "/auth/login";
pub const LOGOUT_PATH: &str = "/auth/logout";
pub const VALIDATE_PATH: &str = "/auth/validate";
pub const CURRENT_USER_PATH: &str = "/user/current";
pub const CURRENT_USER_ID_PATH: &str = "/user/id";
pub const PERMISSIONS_PATH: &str = "/user/permissions";
pub const PROFILE_PATH: &str = "/user/profile";
pub const HEALTH_PATH: &str = "/health";
pub const DETAILED_HEALTH_PATH: &str = "/health/detailed";

fn logged<T>(operation: &'static str, result: Result<T, ApiError>) -> Result<T, ApiError> {
    if let Err(e) = &result {
        tracing::error!(operation, error = %e, "session call failed");
    }
    result
}

#[derive(Clone, Debug)]
pub struct SessionService {
    api: ApiClient,
}

impl SessionService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    #[must_use]
    pub fn session(&self) -> &SessionContext {
        self.api.session()
    }

    /// `POST /auth/login`. The caller stores the returned token.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        tracing::info!(username = %credentials.username, "logging in");
        logged("login", self.api.post(LOGIN_PATH, Some(credentials)).await)
    }

    /// `POST /auth/logout`. Local credentials are left alone.
    pub async fn logout(&self) -> Result<String, ApiError> {
        logged("logout", self.api.post_text(LOGOUT_PATH).await)
    }

    /// `GET /auth/validate`.
    pub async fn validate_token(&self) -> Result<String, ApiError> {
        logged("validate_token", self.api.get_text(VALIDATE_PATH).await)
    }

    /// `GET /user/current`.
    pub async fn current_user(&self) -> Result<UserInfo, ApiError> {
        logged("current_user", self.api.get(CURRENT_USER_PATH).await)
    }

    /// `GET /user/id`.
    pub async fn current_user_id(&self) -> Result<UserId, ApiError> {
        logged("current_user_id", self.api.get(CURRENT_USER_ID_PATH).await)
    }

    /// `GET /user/permissions`.
    pub async fn user_permissions(&self) -> Result<UserPermissions, ApiError> {
        logged("user_permissions", self.api.get(PERMISSIONS_PATH).await)
    }

    /// `GET /user/profile`.
    pub async fn user_profile(&self) -> Result<UserProfile, ApiError> {
        logged("user_profile", self.api.get(PROFILE_PATH).await)
    }

    /// `GET /health`.
    pub async fn health_check(&self) -> Result<HealthResponse, ApiError> {
        logged("health_check", self.api.get(HEALTH_PATH).await)
    }

    /// `GET /health/detailed`. The shape is backend-defined.
    pub async fn detailed_health_check(&self) -> Result<serde_json::Value, ApiError> {
        logged("detailed_health_check", self.api.get(DETAILED_HEALTH_PATH).await)
    }
}
