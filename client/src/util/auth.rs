//! Credential input helpers shared by the login view.
//!
//! SYSTEM CONTEXT
//! ==============
//! These checks run before any request leaves the client. They only gate the
//! form; the server still decides whether the credentials are valid.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

const USERNAME_MIN_CHARS: usize = 3;
const USERNAME_MAX_CHARS: usize = 20;
const PASSWORD_MIN_CHARS: usize = 6;
const PASSWORD_MAX_CHARS: usize = 50;

/// Coarse password strength shown next to the password input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PasswordStrength {
    #[default]
    Weak,
    Medium,
    Strong,
}

impl PasswordStrength {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Medium => "medium",
            Self::Strong => "strong",
        }
    }

    /// Fill level of the strength meter, in percent.
    #[must_use]
    pub fn meter_percent(self) -> u8 {
        match self {
            Self::Weak => 33,
            Self::Medium => 66,
            Self::Strong => 100,
        }
    }
}

impl std::fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Username must be 3-20 characters of ASCII letters, digits or `_`.
#[must_use]
pub fn validate_username(username: &str) -> bool {
    if username.trim().is_empty() {
        return false;
    }
    let len = username.chars().count();
    if !(USERNAME_MIN_CHARS..=USERNAME_MAX_CHARS).contains(&len) {
        return false;
    }
    username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Password must be non-blank and 6-50 characters long.
#[must_use]
pub fn validate_password(password: &str) -> bool {
    if password.trim().is_empty() {
        return false;
    }
    let len = password.chars().count();
    (PASSWORD_MIN_CHARS..=PASSWORD_MAX_CHARS).contains(&len)
}

/// Score a password over length and character classes.
///
/// One point each for length >= 8, length >= 12, a lowercase letter, an
/// uppercase letter, a digit and a non-alphanumeric character. Scores up to 2
/// are weak, up to 4 medium, anything above strong. Passwords shorter than 6
/// characters are always weak.
#[must_use]
pub fn password_strength(password: &str) -> PasswordStrength {
    let len = password.chars().count();
    if len < PASSWORD_MIN_CHARS {
        return PasswordStrength::Weak;
    }

    let checks = [
        len >= 8,
        len >= 12,
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    let score = checks.iter().filter(|hit| **hit).count();

    match score {
        0..=2 => PasswordStrength::Weak,
        3..=4 => PasswordStrength::Medium,
        _ => PasswordStrength::Strong,
    }
}

/// Prefer the display name, falling back to the username when it is blank.
#[must_use]
pub fn format_display_name<'a>(username: &'a str, display_name: Option<&'a str>) -> &'a str {
    match display_name {
        Some(name) if !name.trim().is_empty() => name,
        _ => username,
    }
}
