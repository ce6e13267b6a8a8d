//! Login view: username/password form with live password strength.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use super::panel::Panel;
use crate::app::Route;
use crate::net::session::SessionService;
use crate::net::types::{LoginRequest, LoginResponse};
use crate::state::auth::{DEFAULT_TOKEN_TTL_DAYS, SessionContext};
use crate::state::ui::{Notice, Notices};
use crate::util::auth::{PasswordStrength, format_display_name, password_strength, validate_password, validate_username};

pub const TEST_USERNAME: &str = "admin";
pub const TEST_PASSWORD: &str = "admin123";

const USERNAME_REQUIRED: &str = "Please enter your username";
const USERNAME_FORMAT: &str = "Invalid username (3-20 characters, letters, digits and underscores only)";
const PASSWORD_REQUIRED: &str = "Please enter your password";
const PASSWORD_LENGTH: &str = "Password must be between 6 and 50 characters";
const NO_TOKEN: &str = "Login failed: no valid token received";

pub(crate) fn username_error(username: &str) -> Option<&'static str> {
    if username.is_empty() {
        Some(USERNAME_REQUIRED)
    } else if !validate_username(username) {
        Some(USERNAME_FORMAT)
    } else {
        None
    }
}

pub(crate) fn password_error(password: &str) -> Option<&'static str> {
    if password.is_empty() {
        Some(PASSWORD_REQUIRED)
    } else if !validate_password(password) {
        Some(PASSWORD_LENGTH)
    } else {
        None
    }
}

/// Inline validation messages, one slot per field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub username: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl FieldErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

#[derive(Debug)]
pub struct LoginPage {
    username: String,
    password: String,
    strength: PasswordStrength,
    loading: bool,
    errors: FieldErrors,
    token_ttl_days: i64,
    pub notices: Notices,
}

impl Default for LoginPage {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            strength: PasswordStrength::Weak,
            loading: false,
            errors: FieldErrors::default(),
            token_ttl_days: DEFAULT_TOKEN_TTL_DAYS,
            notices: Notices::default(),
        }
    }
}

impl LoginPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token_ttl_days(mut self, days: i64) -> Self {
        self.token_ttl_days = days;
        self
    }

    /// Redirect home when a session already exists.
    #[must_use]
    pub fn mount(session: &SessionContext) -> Option<Route> {
        Route::Login.guard(session)
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
        self.errors.username = None;
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
        self.strength = password_strength(&self.password);
        self.errors.password = None;
    }

    /// Prefill the demo account.
    pub fn fill_test_account(&mut self) {
        self.set_username(TEST_USERNAME);
        self.set_password(TEST_PASSWORD);
    }

    #[must_use]
    pub fn strength(&self) -> PasswordStrength {
        self.strength
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn errors(&self) -> FieldErrors {
        self.errors
    }

    /// Check both fields, recording inline errors. Returns the credentials
    /// only when the form may be submitted.
    pub fn validate(&mut self) -> Option<LoginRequest> {
        self.errors = FieldErrors { username: username_error(&self.username), password: password_error(&self.password) };
        self.errors
            .is_empty()
            .then(|| LoginRequest { username: self.username.clone(), password: self.password.clone() })
    }

    /// Submit the form. Returns the route to navigate to on success.
    ///
    /// Ignored while a previous submission is in flight.
    pub async fn submit(&mut self, service: &SessionService) -> Option<Route> {
        if self.loading {
            return None;
        }
        let credentials = self.validate()?;

        self.loading = true;
        let outcome = service.login(&credentials).await;
        self.loading = false;

        match outcome {
            Ok(response) => self.accept(response, service.session()),
            Err(e) => {
                let message = e.detail().map_or_else(|| e.to_string(), str::to_owned);
                self.notices.push(Notice::error(message));
                e.redirect_from(Route::Login)
            }
        }
    }

    fn accept(&mut self, response: LoginResponse, session: &SessionContext) -> Option<Route> {
        let Some(token) = response.token.filter(|t| !t.trim().is_empty()) else {
            tracing::warn!(message = %response.message, "login succeeded without a token");
            self.notices.push(Notice::error(NO_TOKEN));
            return None;
        };

        if let Err(e) = session.set_token(&token, self.token_ttl_days) {
            tracing::error!(error = %e, "failed to store session token");
            self.notices.push(Notice::error(format!("Login failed: {e}")));
            return None;
        }

        let welcome = match &response.user {
            Some(user) => format_display_name(&user.username, Some(&user.display_name)).to_owned(),
            None => self.username.clone(),
        };
        tracing::info!(username = %self.username, "login succeeded");
        self.notices.push(Notice::success(format!("Login successful! Welcome {welcome}")));
        self.password.clear();
        Some(Route::Home)
    }

    #[must_use]
    pub fn render(&self) -> Panel {
        let mut panel = Panel::new("User Login")
            .row("Username", self.username.clone())
            .row("Password", "*".repeat(self.password.chars().count()))
            .row("Strength", format!("{} ({}%)", self.strength, self.strength.meter_percent()));
        if let Some(msg) = self.errors.username {
            panel = panel.row("Username error", msg);
        }
        if let Some(msg) = self.errors.password {
            panel = panel.row("Password error", msg);
        }
        let button = if self.loading { "Logging in..." } else { "Log in" };
        panel.row("Action", button)
    }
}
