//! Approval client configuration parsed from environment variables.

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 3600;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalConfig {
    /// Origin serving `/api/approval/submit`, without a trailing slash.
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for ApprovalConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_owned(), request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS }
    }
}

impl ApprovalConfig {
    /// Optional:
    /// - `APPROVAL_BASE_URL`: default `http://localhost:8080`
    /// - `APPROVAL_REQUEST_TIMEOUT_SECS`: default 10, within `1..=3600`
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("APPROVAL_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        let request_timeout_secs = match std::env::var("APPROVAL_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if (1..=MAX_REQUEST_TIMEOUT_SECS).contains(&secs) => secs,
                _ => return Err(ConfigError::Invalid { var: "APPROVAL_REQUEST_TIMEOUT_SECS", value: raw }),
            },
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };
        Ok(Self { base_url: base_url.trim().trim_end_matches('/').to_owned(), request_timeout_secs })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
