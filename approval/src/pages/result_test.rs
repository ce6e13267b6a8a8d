use super::*;
use crate::net::types::ApprovalStatus;

fn state(status: ApprovalStatus, approver: Option<&str>, id: Option<&str>) -> ResultState {
    ResultState {
        request: ApprovalRequest { amount: 150.0, purpose: "travel".into() },
        response: ApprovalResponse {
            success: true,
            status,
            message: "Approved by Team Leader".into(),
            approver: approver.map(str::to_owned),
            approval_id: id.map(str::to_owned),
        },
    }
}

#[test]
fn approved_result_shows_all_details() {
    let page = ResultPage::new(Some(state(ApprovalStatus::Approved, Some("Team Leader"), Some("A1"))));
    let view = page.view();

    assert_eq!(view.outcome, Outcome::Success);
    assert_eq!(view.title, "Request Approved");
    assert_eq!(view.subtitle, "Approved by Team Leader");
    assert_eq!(view.detail("Amount"), Some("$150.00"));
    assert_eq!(view.detail("Purpose"), Some("travel"));
    assert_eq!(view.detail("Approver"), Some("Team Leader"));
    assert_eq!(view.detail("Approval ID"), Some("A1"));
    assert_eq!(view.copy_text(), Some("A1"));
    assert_eq!(view.action, "Submit Another Request");
}

#[test]
fn rejected_result_omits_missing_fields() {
    let page = ResultPage::new(Some(state(ApprovalStatus::Rejected, None, None)));
    let view = page.view();

    assert_eq!(view.outcome, Outcome::Error);
    assert_eq!(view.title, "Request Rejected");
    assert_eq!(view.detail("Approver"), None);
    assert_eq!(view.detail("Approval ID"), None);
    assert_eq!(view.copy_text(), None);
}

#[test]
fn status_alone_decides_the_title() {
    let mut s = state(ApprovalStatus::Approved, None, None);
    s.response.success = false;
    assert_eq!(ResultPage::new(Some(s)).view().title, "Request Approved");
}

#[test]
fn missing_state_renders_placeholder() {
    let page = ResultPage::new(None);
    let view = page.view();

    assert_eq!(view.outcome, Outcome::Warning);
    assert_eq!(view.title, "No Result Data");
    assert_eq!(view.subtitle, "Please submit a request first.");
    assert_eq!(view.action, "Go to Home");
    assert!(view.details.is_empty());
    assert_eq!(page.action(), Route::Request);
}

#[test]
fn display_renders_copy_marker() {
    let text = ResultPage::new(Some(state(ApprovalStatus::Approved, Some("Team Leader"), Some("A1")))).view().to_string();
    assert!(text.starts_with("== Request Approved ==\n"));
    assert!(text.contains("A1  (copy)"));
    assert!(text.ends_with("[Submit Another Request]\n"));
}
