//! Session token state for the current client user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionContext` is the single owner of the token cookie. It is handed to
//! the HTTP layer, which reads the token on every request and clears it when
//! the server answers 401. Views consult it for route guards.
//!
//! TRADE-OFFS
//! ==========
//! `is_logged_in` only checks for a non-blank token. An expired or revoked
//! token keeps reporting logged-in until the server rejects a request; the
//! server is the authority on session validity.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use cookie::{Cookie, SameSite};
use time::{Duration, OffsetDateTime};

use super::jar::{CookieJar, MemoryJar, StoreError};

/// Cookie name holding the session token.
pub const TOKEN_KEY: &str = "token";

/// Token lifetime used when the caller has no preference.
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 1;

/// Longest token lifetime accepted, in days.
pub const MAX_TOKEN_TTL_DAYS: i64 = 3650;

/// Cookie-value octets (RFC 6265): printable ASCII minus space, `"`, `,`, `;`
/// and `\`.
fn is_cookie_value_safe(value: &str) -> bool {
    value
        .bytes()
        .all(|b| b.is_ascii_graphic() && !matches!(b, b'"' | b',' | b';' | b'\\'))
}

/// Explicit handle on the client's auth state.
#[derive(Clone)]
pub struct SessionContext {
    jar: Arc<dyn CookieJar>,
    secure: bool,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("logged_in", &self.is_logged_in())
            .field("secure", &self.secure)
            .finish_non_exhaustive()
    }
}

impl SessionContext {
    #[must_use]
    pub fn new(jar: Arc<dyn CookieJar>) -> Self {
        Self { jar, secure: false }
    }

    /// Session backed by a fresh in-memory jar.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryJar::new()))
    }

    /// Mark the token cookie `Secure`.
    #[must_use]
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Current token, if one is stored. An empty cookie value counts as absent.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.jar
            .get(TOKEN_KEY)
            .map(|c| c.value().to_owned())
            .filter(|v| !v.is_empty())
    }

    /// Store `token` with a lifetime of `ttl_days`.
    ///
    /// # Errors
    ///
    /// Rejects a lifetime outside `1..=MAX_TOKEN_TTL_DAYS` and a token that
    /// would not survive a round trip through a cookie line.
    pub fn set_token(&self, token: &str, ttl_days: i64) -> Result<(), StoreError> {
        if !(1..=MAX_TOKEN_TTL_DAYS).contains(&ttl_days) {
            return Err(StoreError::InvalidLifetime { ttl_days });
        }
        if !is_cookie_value_safe(token) {
            return Err(StoreError::InvalidValue { name: TOKEN_KEY });
        }
        let expires = OffsetDateTime::now_utc()
            .checked_add(Duration::days(ttl_days))
            .ok_or(StoreError::InvalidLifetime { ttl_days })?;
        let cookie = Cookie::build((TOKEN_KEY, token.to_owned()))
            .path("/")
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .expires(expires)
            .build();
        self.jar.set(cookie)?;
        tracing::debug!(ttl_days, "session token stored");
        Ok(())
    }

    pub fn remove_token(&self) -> Result<(), StoreError> {
        self.jar.remove(TOKEN_KEY)
    }

    /// True when a non-blank token is present. No expiry or signature check.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.token().is_some_and(|t| !t.trim().is_empty())
    }

    /// Drop all local credentials. Jar failures are logged, not returned, so
    /// callers on a logout or 401 path always proceed.
    pub fn clear_auth(&self) {
        if let Err(e) = self.remove_token() {
            tracing::warn!(error = %e, "failed to clear session token");
        }
    }
}
