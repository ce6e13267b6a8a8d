//! HTTP transport for the session lab backend.
//!
//! REQUEST PHASE
//! =============
//! Every request carries the stored token twice: as a `token` header and as
//! `Authorization: Bearer <token>`. Requests without a stored token go out
//! bare and let the server decide.
//!
//! RESPONSE PHASE
//! ==============
//! 2xx bodies are decoded and handed back. Anything else becomes an
//! [`ApiError`]. A 401 also clears the local token before returning, so the
//! session is already logged out when the caller sees the error. The client
//! never swallows a failure; recovery beyond the token is the caller's job.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::ErrorBody;
use crate::config::{ClientConfig, normalize_base_url};
use crate::state::auth::SessionContext;

/// Custom header carrying the raw token.
pub const TOKEN_HEADER: &str = "token";

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionContext,
}

impl ApiClient {
    /// Build a client for `config.api_base_url` bound to `session`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig, session: SessionContext) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;
        Ok(Self { http, base_url: normalize_base_url(&config.api_base_url), session })
    }

    #[must_use]
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let bytes = self.send::<()>(Method::GET, path, None).await?;
        decode_json(&bytes)
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: Option<&B>) -> Result<T, ApiError> {
        let bytes = self.send(Method::POST, path, body).await?;
        decode_json(&bytes)
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: Option<&B>) -> Result<T, ApiError> {
        let bytes = self.send(Method::PUT, path, body).await?;
        decode_json(&bytes)
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let bytes = self.send::<()>(Method::DELETE, path, None).await?;
        decode_json(&bytes)
    }

    /// GET an endpoint that answers with a bare acknowledgement string.
    pub async fn get_text(&self, path: &str) -> Result<String, ApiError> {
        let bytes = self.send::<()>(Method::GET, path, None).await?;
        Ok(decode_text(&bytes))
    }

    /// POST without a body to an endpoint that answers with a bare string.
    pub async fn post_text(&self, path: &str) -> Result<String, ApiError> {
        let bytes = self.send::<()>(Method::POST, path, None).await?;
        Ok(decode_text(&bytes))
    }

    async fn send<B: Serialize>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Vec<u8>, ApiError> {
        let url = self.endpoint(path);
        let headers = auth_headers(self.session.token().as_deref())?;

        let mut request = self.http.request(method.clone(), &url).headers(headers);
        if let Some(body) = body {
            let json = serde_json::to_vec(body).map_err(|e| ApiError::Config(e.to_string()))?;
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(json);
        }

        tracing::debug!(%method, %url, "sending request");
        let response = request.send().await.map_err(|e| classify_transport(&method, &url, e))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| classify_transport(&method, &url, e))?;
        tracing::debug!(%method, %url, status = status.as_u16(), "received response");

        if status.is_success() {
            return Ok(bytes.to_vec());
        }
        Err(self.fail(status, &method, &url, &bytes))
    }

    fn fail(&self, status: StatusCode, method: &Method, url: &str, body: &[u8]) -> ApiError {
        let detail = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(ErrorBody::into_detail);
        let err = ApiError::from_status(status.as_u16(), detail);
        if err.is_unauthorized() {
            self.session.clear_auth();
            tracing::warn!(%method, %url, "session rejected by server; local token cleared");
        } else {
            tracing::error!(%method, %url, status = status.as_u16(), error = %err, "request failed");
        }
        err
    }
}

/// Token headers for an outgoing request. Empty when no token is stored.
pub(crate) fn auth_headers(token: Option<&str>) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    let Some(token) = token else {
        return Ok(headers);
    };
    let raw = HeaderValue::from_str(token).map_err(|e| ApiError::Config(e.to_string()))?;
    let bearer = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| ApiError::Config(e.to_string()))?;
    headers.insert(HeaderName::from_static(TOKEN_HEADER), raw);
    headers.insert(AUTHORIZATION, bearer);
    Ok(headers)
}

fn classify_transport(method: &Method, url: &str, err: reqwest::Error) -> ApiError {
    if err.is_builder() {
        tracing::error!(%method, %url, error = %err, "request could not be built");
        return ApiError::Config(err.to_string());
    }
    tracing::error!(%method, %url, error = %err, "no response from server");
    ApiError::Network(err)
}

fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(bytes).map_err(|e| {
        tracing::error!(error = %e, "response body did not match expected shape");
        ApiError::Decode(e)
    })
}

/// Acknowledgement bodies arrive either as plain text or as a JSON string.
pub(crate) fn decode_text(bytes: &[u8]) -> String {
    serde_json::from_slice::<String>(bytes).unwrap_or_else(|_| String::from_utf8_lossy(bytes).into_owned())
}
