use super::*;
use serde_json::json;

#[test]
fn approved_response_decodes_optional_fields() {
    let resp: ApprovalResponse = serde_json::from_value(json!({
        "success": true,
        "status": "approved",
        "message": "Approved by Team Leader",
        "approvalId": "A1",
        "approver": "Team Leader"
    }))
    .unwrap();
    assert!(resp.is_approved());
    assert_eq!(resp.approval_id.as_deref(), Some("A1"));
    assert_eq!(resp.approver.as_deref(), Some("Team Leader"));
}

#[test]
fn rejected_response_without_id() {
    let resp: ApprovalResponse =
        serde_json::from_value(json!({ "success": true, "status": "rejected", "message": "Too large" })).unwrap();
    assert!(!resp.is_approved());
    assert!(resp.approval_id.is_none());
}

#[test]
fn unknown_status_is_rejected_by_decoder() {
    let decoded = serde_json::from_value::<ApprovalResponse>(json!({ "success": true, "status": "pending" }));
    assert!(decoded.is_err());
}

#[test]
fn request_serializes_plain_fields() {
    let body = serde_json::to_value(ApprovalRequest { amount: 150.0, purpose: "travel".into() }).unwrap();
    assert_eq!(body, json!({ "amount": 150.0, "purpose": "travel" }));
}
