//! Cookie persistence backends.
//!
//! DESIGN
//! ======
//! A jar stores whole cookies, attributes included, so the session layer can
//! describe the token cookie the same way a browser would see it. Cookies whose
//! `Expires` has passed are treated as absent on read, matching browser jars.
//!
//! `FileJar` keeps one `Set-Cookie` formatted line per cookie. Lines that fail
//! to parse are skipped on read and dropped on the next write. On unix the file
//! is readable by its owner only, since it holds bearer tokens.

#[cfg(test)]
#[path = "jar_test.rs"]
mod jar_test;

use std::collections::HashMap;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use cookie::Cookie;
use time::OffsetDateTime;

/// Error returned when a jar cannot persist a change.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("cookie file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cookie lifetime of {ttl_days} days is out of range")]
    InvalidLifetime { ttl_days: i64 },
    #[error("cookie {name} has a value that cannot be stored")]
    InvalidValue { name: &'static str },
}

/// Storage for client-side cookies.
pub trait CookieJar: Send + Sync {
    /// Return the named cookie unless it is missing or expired.
    fn get(&self, name: &str) -> Option<Cookie<'static>>;

    /// Insert or replace a cookie by name.
    fn set(&self, cookie: Cookie<'static>) -> Result<(), StoreError>;

    /// Delete a cookie by name. Removing a missing cookie is not an error.
    fn remove(&self, name: &str) -> Result<(), StoreError>;
}

fn is_expired(cookie: &Cookie<'_>, now: OffsetDateTime) -> bool {
    cookie.expires_datetime().is_some_and(|at| at <= now)
}

// =============================================================================
// MEMORY JAR
// =============================================================================

/// Process-local jar. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryJar {
    cookies: Mutex<HashMap<String, Cookie<'static>>>,
}

impl MemoryJar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CookieJar for MemoryJar {
    fn get(&self, name: &str) -> Option<Cookie<'static>> {
        let cookies = self.cookies.lock().unwrap_or_else(PoisonError::into_inner);
        cookies
            .get(name)
            .filter(|c| !is_expired(c, OffsetDateTime::now_utc()))
            .cloned()
    }

    fn set(&self, cookie: Cookie<'static>) -> Result<(), StoreError> {
        let mut cookies = self.cookies.lock().unwrap_or_else(PoisonError::into_inner);
        cookies.insert(cookie.name().to_owned(), cookie);
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<(), StoreError> {
        let mut cookies = self.cookies.lock().unwrap_or_else(PoisonError::into_inner);
        cookies.remove(name);
        Ok(())
    }
}

// =============================================================================
// FILE JAR
// =============================================================================

/// Jar persisted to a text file so a session survives between CLI runs.
#[derive(Debug)]
pub struct FileJar {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileJar {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io { path: self.path.clone(), source }
    }

    fn read_all(&self) -> Result<Vec<Cookie<'static>>, StoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        let mut cookies = Vec::new();
        for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
            match Cookie::parse(line.to_owned()) {
                Ok(cookie) => cookies.push(cookie),
                Err(e) => tracing::warn!(path = %self.path.display(), error = %e, "skipping malformed cookie line"),
            }
        }
        Ok(cookies)
    }

    fn write_all(&self, cookies: &[Cookie<'static>]) -> Result<(), StoreError> {
        if cookies.is_empty() {
            return match std::fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(self.io_error(e)),
            };
        }

        let mut body = String::new();
        for cookie in cookies {
            body.push_str(&cookie.to_string());
            body.push('\n');
        }
        let mut file = open_private(&self.path).map_err(|e| self.io_error(e))?;
        file.write_all(body.as_bytes()).map_err(|e| self.io_error(e))
    }
}

/// Open `path` for rewriting with owner-only permissions.
#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<std::fs::File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = std::fs::OpenOptions::new().write(true).create(true).truncate(true).mode(0o600).open(path)?;
    // `mode` only applies on creation; tighten a file left by an older run.
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<std::fs::File> {
    std::fs::OpenOptions::new().write(true).create(true).truncate(true).open(path)
}

impl CookieJar for FileJar {
    fn get(&self, name: &str) -> Option<Cookie<'static>> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let cookies = match self.read_all() {
            Ok(cookies) => cookies,
            Err(e) => {
                tracing::warn!(error = %e, "cookie jar unreadable");
                return None;
            }
        };
        let now = OffsetDateTime::now_utc();
        cookies.into_iter().find(|c| c.name() == name && !is_expired(c, now))
    }

    fn set(&self, cookie: Cookie<'static>) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut cookies = self.read_all()?;
        cookies.retain(|c| c.name() != cookie.name());
        cookies.push(cookie);
        self.write_all(&cookies)
    }

    fn remove(&self, name: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut cookies = self.read_all()?;
        let before = cookies.len();
        cookies.retain(|c| c.name() != name);
        if cookies.len() == before {
            return Ok(());
        }
        self.write_all(&cookies)
    }
}
