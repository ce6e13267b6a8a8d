//! Client configuration parsed from environment variables.

use std::ops::RangeInclusive;

use crate::state::auth::{DEFAULT_TOKEN_TTL_DAYS, MAX_TOKEN_TTL_DAYS};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 3600;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix for every session endpoint, without a trailing slash.
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub cookie_secure: bool,
    pub token_ttl_days: i64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            cookie_secure: false,
            token_ttl_days: DEFAULT_TOKEN_TTL_DAYS,
        }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `SESSION_API_BASE_URL`: default `http://localhost:8080/api`
    /// - `SESSION_REQUEST_TIMEOUT_SECS`: default 10, within `1..=3600`
    /// - `SESSION_COOKIE_SECURE`: `1/true/yes/on` or `0/false/no/off`, default off
    /// - `SESSION_TOKEN_TTL_DAYS`: default 1, within `1..=3650`
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = std::env::var("SESSION_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_owned());
        let request_timeout_secs = env_parse_within(
            "SESSION_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
            1..=MAX_REQUEST_TIMEOUT_SECS,
        )?;
        let cookie_secure = match std::env::var("SESSION_COOKIE_SECURE") {
            Ok(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { var: "SESSION_COOKIE_SECURE", value: raw })?,
            Err(_) => false,
        };
        let token_ttl_days =
            env_parse_within("SESSION_TOKEN_TTL_DAYS", DEFAULT_TOKEN_TTL_DAYS, 1..=MAX_TOKEN_TTL_DAYS)?;

        Ok(Self {
            api_base_url: normalize_base_url(&api_base_url),
            request_timeout_secs,
            cookie_secure,
            token_ttl_days,
        })
    }
}

#[must_use]
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse `var` when set, rejecting values outside `range`.
fn env_parse_within<T>(var: &'static str, default: T, range: RangeInclusive<T>) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd,
{
    let Ok(raw) = std::env::var(var) else {
        return Ok(default);
    };
    match raw.trim().parse::<T>() {
        Ok(value) if range.contains(&value) => Ok(value),
        _ => Err(ConfigError::Invalid { var, value: raw }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
