//! HTTP call for submitting an approval request.
//!
//! The approval backend is unauthenticated, so this client carries no token.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::time::Duration;

use super::types::{ApprovalRequest, ApprovalResponse};
use crate::config::ApprovalConfig;

pub const SUBMIT_PATH: &str = "/api/approval/submit";

#[derive(Debug, thiserror::Error)]
pub enum ApprovalError {
    #[error("approval request failed: {0}")]
    Network(#[source] reqwest::Error),
    #[error("approval request failed: {status}")]
    Status { status: u16 },
    #[error("approval response could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("approval client could not be built: {0}")]
    Config(#[source] reqwest::Error),
}

#[derive(Clone, Debug)]
pub struct ApprovalClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApprovalClient {
    /// # Errors
    ///
    /// Returns [`ApprovalError::Config`] if the HTTP client cannot be constructed.
    pub fn new(config: &ApprovalConfig) -> Result<Self, ApprovalError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(ApprovalError::Config)?;
        Ok(Self { http, base_url: config.base_url.trim_end_matches('/').to_owned() })
    }

    pub(crate) fn submit_url(&self) -> String {
        format!("{}{SUBMIT_PATH}", self.base_url)
    }

    /// `POST /api/approval/submit`.
    pub async fn submit(&self, request: &ApprovalRequest) -> Result<ApprovalResponse, ApprovalError> {
        let url = self.submit_url();
        tracing::info!(amount = request.amount, purpose = %request.purpose, "submitting approval request");

        let resp = self.http.post(&url).json(request).send().await.map_err(|e| {
            tracing::error!(%url, error = %e, "approval request failed");
            ApprovalError::Network(e)
        })?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            tracing::error!(%url, status, "approval request rejected");
            return Err(ApprovalError::Status { status });
        }

        let body: ApprovalResponse = resp.json().await.map_err(ApprovalError::Decode)?;
        tracing::info!(status = ?body.status, approval_id = ?body.approval_id, "approval decided");
        Ok(body)
    }
}
