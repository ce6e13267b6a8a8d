//! In-process fake approval backend for async tests.

use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use serde_json::json;

use crate::config::ApprovalConfig;
use crate::net::api::ApprovalClient;
use crate::net::types::ApprovalRequest;

/// Approves under 1000, otherwise rejects. A forced status overrides both.
#[derive(Clone, Default)]
pub struct FakeApprovals {
    pub received: Arc<Mutex<Vec<ApprovalRequest>>>,
    pub force_status: Arc<Mutex<Option<u16>>>,
}

async fn submit(State(fake): State<FakeApprovals>, Json(req): Json<ApprovalRequest>) -> Response {
    fake.received.lock().unwrap().push(req.clone());
    if let Some(status) = *fake.force_status.lock().unwrap() {
        return StatusCode::from_u16(status).unwrap().into_response();
    }
    if req.amount < 1000.0 {
        Json(json!({
            "success": true,
            "status": "approved",
            "message": "Approved by Team Leader",
            "approver": "Team Leader",
            "approvalId": "A1"
        }))
        .into_response()
    } else {
        Json(json!({ "success": true, "status": "rejected", "message": "Amount exceeds approval limits" }))
            .into_response()
    }
}

pub async fn spawn_fake() -> (FakeApprovals, ApprovalClient) {
    let fake = FakeApprovals::default();
    let router = Router::new().route("/api/approval/submit", post(submit)).with_state(fake.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    let config = ApprovalConfig { base_url: format!("http://{addr}"), request_timeout_secs: 5 };
    (fake, ApprovalClient::new(&config).unwrap())
}

pub async fn dead_client() -> ApprovalClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let config = ApprovalConfig { base_url: format!("http://{addr}"), request_timeout_secs: 5 };
    ApprovalClient::new(&config).unwrap()
}
