//! Request view: amount + purpose form that submits one approval request.

#[cfg(test)]
#[path = "request_test.rs"]
mod request_test;

use super::result::ResultState;
use crate::net::api::ApprovalClient;
use crate::net::types::ApprovalRequest;

pub const MAX_PURPOSE_CHARS: usize = 200;
pub const MIN_AMOUNT: f64 = 0.01;

const AMOUNT_REQUIRED: &str = "Please input the amount!";
const AMOUNT_POSITIVE: &str = "Amount must be greater than 0!";
const PURPOSE_REQUIRED: &str = "Please input the purpose!";
const PURPOSE_TOO_LONG: &str = "Purpose must be less than 200 characters!";
pub const SUBMIT_FAILED: &str = "Failed to submit approval request. Please try again.";

/// Round half away from zero to cents.
#[must_use]
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

pub(crate) fn amount_error(amount: Option<f64>) -> Option<&'static str> {
    match amount {
        None => Some(AMOUNT_REQUIRED),
        Some(a) if !a.is_finite() || round_cents(a) < MIN_AMOUNT => Some(AMOUNT_POSITIVE),
        Some(_) => None,
    }
}

pub(crate) fn purpose_error(purpose: &str) -> Option<&'static str> {
    if purpose.trim().is_empty() {
        Some(PURPOSE_REQUIRED)
    } else if purpose.chars().count() > MAX_PURPOSE_CHARS {
        Some(PURPOSE_TOO_LONG)
    } else {
        None
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub amount: Option<&'static str>,
    pub purpose: Option<&'static str>,
}

impl FieldErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amount.is_none() && self.purpose.is_none()
    }
}

#[derive(Debug, Default)]
pub struct RequestPage {
    amount: Option<f64>,
    purpose: String,
    loading: bool,
    errors: FieldErrors,
    /// Transient error toast from the last failed submission.
    pub notice: Option<String>,
}

impl RequestPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_amount(&mut self, amount: Option<f64>) {
        self.amount = amount;
        self.errors.amount = None;
    }

    pub fn set_purpose(&mut self, purpose: impl Into<String>) {
        self.purpose = purpose.into();
        self.errors.purpose = None;
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn errors(&self) -> FieldErrors {
        self.errors
    }

    /// Record inline errors and return the request when the form is valid.
    pub fn validate(&mut self) -> Option<ApprovalRequest> {
        self.errors = FieldErrors { amount: amount_error(self.amount), purpose: purpose_error(&self.purpose) };
        if !self.errors.is_empty() {
            return None;
        }
        let amount = round_cents(self.amount?);
        Some(ApprovalRequest { amount, purpose: self.purpose.clone() })
    }

    /// Submit the form. On success the caller navigates to
    /// [`Route::Result`](crate::app::Route::Result) carrying the returned state.
    pub async fn submit(&mut self, client: &ApprovalClient) -> Option<ResultState> {
        if self.loading {
            return None;
        }
        let request = self.validate()?;

        self.loading = true;
        self.notice = None;
        let outcome = client.submit(&request).await;
        self.loading = false;

        match outcome {
            Ok(response) => Some(ResultState { request, response }),
            Err(e) => {
                tracing::error!(error = %e, "approval submission failed");
                self.notice = Some(SUBMIT_FAILED.to_owned());
                None
            }
        }
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from("== Approval Request ==\n");
        let amount = self.amount.map_or_else(String::new, |a| format!("{a:.2}"));
        out.push_str(&format!("  Amount   {amount}\n"));
        out.push_str(&format!("  Purpose  {}\n", self.purpose));
        for msg in [self.errors.amount, self.errors.purpose].into_iter().flatten() {
            out.push_str(&format!("  ! {msg}\n"));
        }
        if let Some(notice) = &self.notice {
            out.push_str(&format!("[error] {notice}\n"));
        }
        out.push_str(if self.loading { "  [Submitting...]\n" } else { "  [Submit]\n" });
        out
    }
}
