//! Failure classification for session API calls.
//!
//! Every variant's `Display` is the message shown to the user. Status errors
//! also keep whatever `message`/`error` text the server sent, for views that
//! prefer the server's wording.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::app::Route;
use crate::state::ui::Notice;

pub const GENERIC_REQUEST_FAILED: &str = "Request failed";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 401. The token has already been cleared when this is returned.
    #[error("Session expired, please log in again")]
    Unauthorized { detail: Option<String> },

    /// 403.
    #[error("Permission denied")]
    Forbidden { detail: Option<String> },

    /// 404.
    #[error("The requested resource does not exist")]
    NotFound { detail: Option<String> },

    /// 500.
    #[error("Internal server error")]
    Server { detail: Option<String> },

    /// Any other non-2xx status.
    #[error("{}", .detail.as_deref().unwrap_or(GENERIC_REQUEST_FAILED))]
    Status { status: u16, detail: Option<String> },

    /// No response: connect failure, timeout, dropped connection.
    #[error("Network connection failed, please check your network settings")]
    Network(#[source] reqwest::Error),

    /// The request could not be built.
    #[error("Request configuration error")]
    Config(String),

    /// 2xx with a body that does not match the expected shape.
    #[error("Unexpected response from server")]
    Decode(#[source] serde_json::Error),
}

impl ApiError {
    /// Classify a non-2xx status, keeping the server's text when present.
    #[must_use]
    pub fn from_status(status: u16, detail: Option<String>) -> Self {
        match status {
            401 => Self::Unauthorized { detail },
            403 => Self::Forbidden { detail },
            404 => Self::NotFound { detail },
            500 => Self::Server { detail },
            _ => Self::Status { status, detail },
        }
    }

    /// HTTP status behind this error, if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::Server { .. } => Some(500),
            Self::Status { status, .. } => Some(*status),
            Self::Network(_) | Self::Config(_) | Self::Decode(_) => None,
        }
    }

    /// Server-provided message, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { detail }
            | Self::Forbidden { detail }
            | Self::NotFound { detail }
            | Self::Server { detail }
            | Self::Status { detail, .. } => detail.as_deref(),
            Self::Network(_) | Self::Config(_) | Self::Decode(_) => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Navigation a view on `current` must perform after this error.
    ///
    /// Only a 401 navigates, and never away from the login view itself.
    #[must_use]
    pub fn redirect_from(&self, current: Route) -> Option<Route> {
        (self.is_unauthorized() && current != Route::Login).then_some(Route::Login)
    }

    /// Transient error notice carrying the user-facing message.
    #[must_use]
    pub fn notice(&self) -> Notice {
        Notice::error(self.to_string())
    }
}
