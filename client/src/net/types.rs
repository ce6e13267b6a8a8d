//! Wire DTOs for the session lab backend.
//!
//! DESIGN
//! ======
//! Field names follow the backend's camelCase JSON. Collections, strings and
//! flags that the backend may omit or send as `null` default to empty so a
//! sparse record still decodes; views render whatever arrived.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Credentials posted to `/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Identity summary returned alongside a fresh token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBasicInfo {
    pub user_id: String,
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    pub token: Option<String>,
    pub user: Option<UserBasicInfo>,
}

/// Full record from `/user/current`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user_id: String,
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub department: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub roles: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub permissions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub login_time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_access_time: String,
}

/// Body of `/user/id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserId {
    pub user_id: String,
}

/// Permission flags from `/user/permissions`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPermissions {
    #[serde(deserialize_with = "null_as_default")]
    pub can_read: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub can_write: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub can_delete: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub can_admin: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub can_manage: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_admin: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_user: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_manager: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub all_permissions: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub all_roles: Vec<String>,
}

/// Profile card data from `/user/profile`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub department: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_logged_in: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ComponentStatus {
    Up,
    Down,
}

/// Body of `/health`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: ComponentStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub service: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    pub redis: Option<ComponentStatus>,
    pub error: Option<String>,
}

/// Error body some endpoints attach to non-2xx responses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ErrorBody {
    /// Server-provided text, `message` first.
    #[must_use]
    pub fn into_detail(self) -> Option<String> {
        self.message
            .filter(|m| !m.trim().is_empty())
            .or(self.error.filter(|e| !e.trim().is_empty()))
    }
}
