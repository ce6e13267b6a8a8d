//! Route table and guards for the session app.
//!
//! Navigation is data: guards and views return the [`Route`] to move to and
//! the caller performs the move. Every navigation replaces the current entry.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use crate::state::auth::SessionContext;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/login`
    Login,
    /// `/`, guarded.
    Home,
}

impl Route {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Home => "/",
        }
    }

    /// Resolve a location path. Unknown paths fall back to home.
    #[must_use]
    pub fn resolve(path: &str) -> Self {
        let trimmed = path.split(['?', '#']).next().unwrap_or_default();
        match trimmed.trim_end_matches('/') {
            "/login" | "login" => Self::Login,
            _ => Self::Home,
        }
    }

    /// Where to send the user instead of `self`, if anywhere.
    #[must_use]
    pub fn guard(self, session: &SessionContext) -> Option<Route> {
        match (self, session.is_logged_in()) {
            (Self::Login, true) => Some(Self::Home),
            (Self::Home, false) => Some(Self::Login),
            _ => None,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Resolve `path` and follow guard redirects until a route is allowed.
#[must_use]
pub fn enter(path: &str, session: &SessionContext) -> Route {
    let mut route = Route::resolve(path);
    // One hop settles: the two guards fire under opposite session states.
    if let Some(next) = route.guard(session) {
        tracing::debug!(from = %route, to = %next, "route guard redirect");
        route = next;
    }
    route
}
