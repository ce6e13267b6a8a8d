//! Transient notifications raised by views.
//!
//! DESIGN
//! ======
//! Views collect notices instead of drawing toasts themselves, so the caller
//! decides how to surface them (terminal line, toast, log).

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A single user-facing notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.level.label(), self.message)
    }
}

/// Queue of notices waiting to be shown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Notices {
    items: Vec<Notice>,
}

impl Notices {
    pub fn push(&mut self, notice: Notice) {
        self.items.push(notice);
    }

    /// Push unless an identical notice is already pending.
    pub fn push_once(&mut self, notice: Notice) {
        if !self.items.contains(&notice) {
            self.items.push(notice);
        }
    }

    /// Take every pending notice, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.items)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Notice] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
