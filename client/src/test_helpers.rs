//! In-process fake of the session lab backend for async tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::json;

use crate::config::ClientConfig;
use crate::net::api::ApiClient;
use crate::net::session::SessionService;
use crate::net::types::LoginRequest;
use crate::state::auth::SessionContext;

pub const VALID_TOKEN: &str = "tok-admin-1";

/// Shared knobs and counters for the fake backend.
#[derive(Clone, Default)]
pub struct FakeBackend {
    /// Endpoint path (without `/api`) -> status to answer with instead.
    failures: Arc<Mutex<HashMap<&'static str, u16>>>,
    pub logout_calls: Arc<AtomicUsize>,
    /// `(token header, authorization header)` for each authorized request.
    pub seen_headers: Arc<Mutex<Vec<(Option<String>, Option<String>)>>>,
}

impl FakeBackend {
    pub fn fail(&self, path: &'static str, status: u16) {
        self.failures.lock().unwrap().insert(path, status);
    }

    pub fn logout_count(&self) -> usize {
        self.logout_calls.load(Ordering::SeqCst)
    }

    fn forced(&self, path: &'static str) -> Option<Response> {
        let status = *self.failures.lock().unwrap().get(path)?;
        let status = StatusCode::from_u16(status).unwrap();
        Some((status, Json(json!({ "message": format!("forced {}", status.as_u16()) }))).into_response())
    }

    fn authorize(&self, headers: &HeaderMap) -> Result<(), Response> {
        let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_owned);
        let token = header("token");
        let authorization = header("authorization");
        self.seen_headers.lock().unwrap().push((token.clone(), authorization.clone()));

        let bearer = format!("Bearer {VALID_TOKEN}");
        if token.as_deref() == Some(VALID_TOKEN) && authorization.as_deref() == Some(bearer.as_str()) {
            Ok(())
        } else {
            Err((StatusCode::UNAUTHORIZED, Json(json!({ "message": "Not logged in" }))).into_response())
        }
    }

    fn guarded(&self, path: &'static str, headers: &HeaderMap, body: impl FnOnce() -> Response) -> Response {
        if let Some(resp) = self.forced(path) {
            return resp;
        }
        match self.authorize(headers) {
            Ok(()) => body(),
            Err(resp) => resp,
        }
    }
}

async fn login(State(b): State<FakeBackend>, Json(req): Json<LoginRequest>) -> Response {
    if let Some(resp) = b.forced("/auth/login") {
        return resp;
    }
    match (req.username.as_str(), req.password.as_str()) {
        ("admin", "admin123") => Json(json!({
            "success": true,
            "message": "Login successful",
            "token": VALID_TOKEN,
            "user": { "userId": "u-1", "username": "admin", "displayName": "Administrator", "email": "admin@lab.test" }
        }))
        .into_response(),
        ("ghost", _) => Json(json!({ "success": true, "message": "no token issued" })).into_response(),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Invalid username or password" })),
        )
            .into_response(),
    }
}

async fn logout(State(b): State<FakeBackend>, headers: HeaderMap) -> Response {
    b.logout_calls.fetch_add(1, Ordering::SeqCst);
    b.guarded("/auth/logout", &headers, || "Logout successful".into_response())
}

async fn validate(State(b): State<FakeBackend>, headers: HeaderMap) -> Response {
    b.guarded("/auth/validate", &headers, || Json("Token is valid").into_response())
}

async fn current_user(State(b): State<FakeBackend>, headers: HeaderMap) -> Response {
    b.guarded("/user/current", &headers, || {
        Json(json!({
            "userId": "u-1",
            "username": "admin",
            "displayName": "Administrator",
            "email": "admin@lab.test",
            "department": "IT",
            "roles": ["ADMIN"],
            "permissions": ["read", "write"],
            "loginTime": "2026-10-18T08:00:00",
            "lastAccessTime": "2026-10-18T08:05:00"
        }))
        .into_response()
    })
}

async fn current_user_id(State(b): State<FakeBackend>, headers: HeaderMap) -> Response {
    b.guarded("/user/id", &headers, || Json(json!({ "userId": "u-1" })).into_response())
}

async fn permissions(State(b): State<FakeBackend>, headers: HeaderMap) -> Response {
    b.guarded("/user/permissions", &headers, || {
        Json(json!({
            "canRead": true,
            "canWrite": true,
            "canDelete": false,
            "canAdmin": true,
            "canManage": false,
            "isAdmin": true,
            "isUser": true,
            "isManager": false,
            "allPermissions": ["read", "write"],
            "allRoles": ["ADMIN"]
        }))
        .into_response()
    })
}

async fn profile(State(b): State<FakeBackend>, headers: HeaderMap) -> Response {
    b.guarded("/user/profile", &headers, || {
        Json(json!({
            "userId": "u-1",
            "username": "admin",
            "displayName": "Administrator",
            "email": "admin@lab.test",
            "department": "IT",
            "isLoggedIn": true
        }))
        .into_response()
    })
}

async fn health(State(b): State<FakeBackend>) -> Response {
    if let Some(resp) = b.forced("/health") {
        return resp;
    }
    Json(json!({
        "status": "UP",
        "timestamp": "2026-10-18T08:00:00",
        "service": "user-session",
        "version": "1.0.0",
        "redis": "UP"
    }))
    .into_response()
}

async fn detailed_health(State(b): State<FakeBackend>) -> Response {
    if let Some(resp) = b.forced("/health/detailed") {
        return resp;
    }
    Json(json!({ "status": "UP", "components": { "redis": { "status": "UP" } } })).into_response()
}

pub fn fake_router(backend: FakeBackend) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/validate", get(validate))
        .route("/api/user/current", get(current_user))
        .route("/api/user/id", get(current_user_id))
        .route("/api/user/permissions", get(permissions))
        .route("/api/user/profile", get(profile))
        .route("/api/health", get(health))
        .route("/api/health/detailed", get(detailed_health))
        .with_state(backend)
}

/// Serve `router` on an ephemeral port; returns the `/api` base URL.
pub async fn spawn_router(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api")
}

/// Base URL on a port nothing listens on.
pub async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api")
}

pub fn service_for(base_url: &str, session: SessionContext) -> SessionService {
    let config = ClientConfig { api_base_url: base_url.to_owned(), request_timeout_secs: 5, ..ClientConfig::default() };
    SessionService::new(ApiClient::new(&config, session).unwrap())
}

/// Fake backend plus a logged-out service pointed at it.
pub async fn spawn_fake() -> (FakeBackend, SessionService) {
    let backend = FakeBackend::default();
    let base = spawn_router(fake_router(backend.clone())).await;
    (backend, service_for(&base, SessionContext::in_memory()))
}

/// Same as [`spawn_fake`] with the valid token already stored.
pub async fn spawn_fake_logged_in() -> (FakeBackend, SessionService) {
    let (backend, service) = spawn_fake().await;
    service.session().set_token(VALID_TOKEN, 1).unwrap();
    (backend, service)
}
