//! Shared helpers for HTTP-level integration tests.
//!
//! Requests are sent straight to the router through
//! `tower::ServiceExt::oneshot`, so every test exercises the same middleware
//! stack production uses without a TCP listener.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use metaforge_api::auth::jwt::{generate_access_token, JwtConfig};
use metaforge_api::config::ServerConfig;
use metaforge_api::router::build_app_router;
use metaforge_api::state::AppState;
use metaforge_api::workload::{InMemoryWorkloadManager, WorkloadManager};
use metaforge_core::roles::{ROLE_ADMIN, ROLE_EDITOR, ROLE_VIEWER};
use metaforge_db::models::user::CreateUser;
use metaforge_db::repositories::UserRepo;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![],
        request_timeout_secs: 30,
        default_workspace_name: "default".to_string(),
        initial_admin_password: "admin".to_string(),
        workload_manager_enabled: false,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. The workload manager is disabled.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        workload_manager: None,
    };
    build_app_router(state, &config)
}

/// Like [`build_test_app`], but with the workload manager enabled so the
/// deployment logs route is mounted. Returns the manager so tests can seed
/// log content.
pub fn build_test_app_with_workload(pool: PgPool) -> (Router, Arc<InMemoryWorkloadManager>) {
    let mut config = test_config();
    config.workload_manager_enabled = true;

    let manager = Arc::new(InMemoryWorkloadManager::new());
    let workload_manager: Arc<dyn WorkloadManager> = manager.clone();

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        workload_manager: Some(workload_manager),
    };
    (build_app_router(state, &config), manager)
}

// ---------------------------------------------------------------------------
// User / token seeding
// ---------------------------------------------------------------------------

/// Insert a user with the given role and mint an access token for it.
///
/// The stored password hash is a placeholder; login-path tests hash a real
/// password themselves.
pub async fn seed_user(pool: &PgPool, name: &str, role: &str) -> (Uuid, String) {
    let input = CreateUser {
        name: name.to_string(),
        full_name: None,
        password: "irrelevant-password".to_string(),
        role: Some(role.to_string()),
    };
    let user = UserRepo::create(pool, &input, "placeholder-hash")
        .await
        .expect("seeding a user should succeed");

    let token =
        generate_access_token(user.id, role, &test_config().jwt).expect("token generation");
    (user.id, token)
}

pub async fn seed_admin(pool: &PgPool) -> (Uuid, String) {
    seed_user(pool, "test-admin", ROLE_ADMIN).await
}

pub async fn seed_editor(pool: &PgPool) -> (Uuid, String) {
    seed_user(pool, "test-editor", ROLE_EDITOR).await
}

pub async fn seed_viewer(pool: &PgPool) -> (Uuid, String) {
    seed_user(pool, "test-viewer", ROLE_VIEWER).await
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("request should build"),
        None => builder.body(Body::empty()).expect("request should build"),
    };

    app.oneshot(request).await.expect("request should succeed")
}

pub async fn get(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn get_unauthed(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(app: Router, uri: &str, token: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_json_unauthed(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, token: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Collect a response body as plain text.
pub async fn body_text(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body should be valid UTF-8")
}

/// Fetch the id of the seeded default workspace.
pub async fn default_workspace_id(pool: &PgPool) -> Uuid {
    sqlx::query_scalar("SELECT id FROM workspaces WHERE name = 'default'")
        .fetch_one(pool)
        .await
        .expect("default workspace should be seeded")
}
