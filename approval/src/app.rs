//! Route table for the approval app. Navigation state travels with the
//! route, so the result view only exists for the navigation that made it.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`
    Request,
    /// `/result`
    Result,
}

impl Route {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Request => "/",
            Self::Result => "/result",
        }
    }

    /// Resolve a location path. Anything unknown lands on the request form.
    #[must_use]
    pub fn resolve(path: &str) -> Self {
        let trimmed = path.split(['?', '#']).next().unwrap_or_default();
        match trimmed.trim_end_matches('/') {
            "/result" | "result" => Self::Result,
            _ => Self::Request,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
