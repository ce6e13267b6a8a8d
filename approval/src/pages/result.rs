//! Result view: shows the decision carried over from the request view.
//!
//! The view is keyed off the response `status` alone. Reaching it without
//! state (a direct visit to `/result`) renders an empty placeholder.

#[cfg(test)]
#[path = "result_test.rs"]
mod result_test;

use std::fmt;

use crate::app::Route;
use crate::net::types::{ApprovalRequest, ApprovalResponse};

/// Navigation state handed from the request view to the result view.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultState {
    pub request: ApprovalRequest,
    pub response: ApprovalResponse,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Error,
    Warning,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Detail {
    pub label: &'static str,
    pub value: String,
    /// Rendered with a copy affordance.
    pub copyable: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultView {
    pub outcome: Outcome,
    pub title: String,
    pub subtitle: String,
    pub details: Vec<Detail>,
    pub action: &'static str,
}

impl ResultView {
    #[must_use]
    pub fn detail(&self, label: &str) -> Option<&str> {
        self.details.iter().find(|d| d.label == label).map(|d| d.value.as_str())
    }

    /// Value offered for copying, if any.
    #[must_use]
    pub fn copy_text(&self) -> Option<&str> {
        self.details.iter().find(|d| d.copyable).map(|d| d.value.as_str())
    }
}

impl fmt::Display for ResultView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;
        writeln!(f, "{}", self.subtitle)?;
        let width = self.details.iter().map(|d| d.label.len()).max().unwrap_or(0);
        for d in &self.details {
            let copy = if d.copyable { "  (copy)" } else { "" };
            writeln!(f, "  {:<width$}  {}{copy}", d.label, d.value)?;
        }
        writeln!(f, "  [{}]", self.action)
    }
}

#[derive(Debug, Default)]
pub struct ResultPage {
    state: Option<ResultState>,
}

impl ResultPage {
    #[must_use]
    pub fn new(state: Option<ResultState>) -> Self {
        Self { state }
    }

    #[must_use]
    pub fn state(&self) -> Option<&ResultState> {
        self.state.as_ref()
    }

    #[must_use]
    pub fn view(&self) -> ResultView {
        let Some(ResultState { request, response }) = &self.state else {
            return ResultView {
                outcome: Outcome::Warning,
                title: "No Result Data".to_owned(),
                subtitle: "Please submit a request first.".to_owned(),
                details: Vec::new(),
                action: "Go to Home",
            };
        };

        let (outcome, title) = if response.is_approved() {
            (Outcome::Success, "Request Approved")
        } else {
            (Outcome::Error, "Request Rejected")
        };

        let mut details = vec![
            Detail { label: "Amount", value: format!("${:.2}", request.amount), copyable: false },
            Detail { label: "Purpose", value: request.purpose.clone(), copyable: false },
        ];
        if let Some(approver) = &response.approver {
            details.push(Detail { label: "Approver", value: approver.clone(), copyable: false });
        }
        if let Some(id) = &response.approval_id {
            details.push(Detail { label: "Approval ID", value: id.clone(), copyable: true });
        }

        ResultView {
            outcome,
            title: title.to_owned(),
            subtitle: response.message.clone(),
            details,
            action: "Submit Another Request",
        }
    }

    /// Both the retry action and the empty-state action lead back to the form.
    #[must_use]
    pub fn action(&self) -> Route {
        Route::Request
    }
}
