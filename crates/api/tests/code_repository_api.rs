//! HTTP-level integration tests for code repository endpoints, with a focus
//! on workspace scoping: the nested path variants must pin the operation to
//! the workspace named in the URL no matter what the body or query says.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use sqlx::PgPool;

async fn create_workspace(pool: &PgPool, admin: &str, name: &str) -> uuid::Uuid {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/workspaces",
        admin,
        serde_json::json!({"name": name}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["id"].as_str().unwrap().parse().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_defaults_to_default_workspace(pool: PgPool) {
    let (editor_id, editor) = common::seed_editor(&pool).await;
    let default_id = common::default_workspace_id(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/code-repositories",
        &editor,
        serde_json::json!({"name": "models-repo", "config": {"url": "git@example.com:ml/models.git"}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["workspace_id"], default_id.to_string());
    assert_eq!(json["data"]["user_id"], editor_id.to_string());
    assert_eq!(json["data"]["config"]["url"], "git@example.com:ml/models.git");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_nested_create_overrides_body_workspace(pool: PgPool) {
    let (_, admin) = common::seed_admin(&pool).await;
    let staging_id = create_workspace(&pool, &admin, "staging").await;
    let default_id = common::default_workspace_id(&pool).await;

    // The body points at the default workspace; the URL must win.
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/workspaces/staging/code-repositories",
        &admin,
        serde_json::json!({"name": "models-repo", "workspace": default_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["workspace_id"], staging_id.to_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_nested_create_accepts_uuid_path_variant(pool: PgPool) {
    let (_, admin) = common::seed_admin(&pool).await;
    let staging_id = create_workspace(&pool, &admin, "staging").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/workspaces/{staging_id}/code-repositories"),
        &admin,
        serde_json::json!({"name": "models-repo"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["workspace_id"], staging_id.to_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_nested_create_unknown_workspace_returns_404(pool: PgPool) {
    let (_, editor) = common::seed_editor(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/workspaces/missing/code-repositories",
        &editor,
        serde_json::json!({"name": "models-repo"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_name_conflicts_only_within_workspace(pool: PgPool) {
    let (_, admin) = common::seed_admin(&pool).await;
    create_workspace(&pool, &admin, "staging").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/code-repositories",
        &admin,
        serde_json::json!({"name": "models-repo"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Same name in the same (default) workspace: conflict.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/code-repositories",
        &admin,
        serde_json::json!({"name": "models-repo"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Same name in another workspace: fine.
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/workspaces/staging/code-repositories",
        &admin,
        serde_json::json!({"name": "models-repo"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_nested_list_is_scoped_and_ignores_query_override(pool: PgPool) {
    let (_, admin) = common::seed_admin(&pool).await;
    create_workspace(&pool, &admin, "staging").await;
    let default_id = common::default_workspace_id(&pool).await;

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/code-repositories",
        &admin,
        serde_json::json!({"name": "default-repo"}),
    )
    .await;
    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/workspaces/staging/code-repositories",
        &admin,
        serde_json::json!({"name": "staging-repo"}),
    )
    .await;

    // Root list sees both.
    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/v1/code-repositories", &admin).await).await;
    assert_eq!(json["data"]["total"], 2);

    // Nested list sees only the URL workspace's rows.
    let app = common::build_test_app(pool.clone());
    let json = body_json(
        get(
            app,
            "/api/v1/workspaces/staging/code-repositories",
            &admin,
        )
        .await,
    )
    .await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["items"][0]["name"], "staging-repo");

    // A workspace_id query param cannot widen the nested scope.
    let app = common::build_test_app(pool);
    let json = body_json(
        get(
            app,
            &format!("/api/v1/workspaces/staging/code-repositories?workspace_id={default_id}"),
            &admin,
        )
        .await,
    )
    .await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["items"][0]["name"], "staging-repo");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_update_delete_roundtrip(pool: PgPool) {
    let (_, editor) = common::seed_editor(&pool).await;

    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/v1/code-repositories",
            &editor,
            serde_json::json!({"name": "models-repo", "description": "original"}),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/code-repositories/{id}"), &editor).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/code-repositories/{id}"),
        &editor,
        serde_json::json!({"description": "updated"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["description"], "updated");
    assert_eq!(json["data"]["name"], "models-repo");

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/code-repositories/{id}"), &editor).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/code-repositories/{id}"), &editor).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_id_returns_404(pool: PgPool) {
    let (_, editor) = common::seed_editor(&pool).await;

    let app = common::build_test_app(pool);
    let response = get(
        app,
        &format!("/api/v1/code-repositories/{}", uuid::Uuid::now_v7()),
        &editor,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_viewer_can_read_but_not_write(pool: PgPool) {
    let (_, editor) = common::seed_editor(&pool).await;
    let (_, viewer) = common::seed_viewer(&pool).await;

    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/v1/code-repositories",
            &editor,
            serde_json::json!({"name": "models-repo"}),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/code-repositories/{id}"), &viewer).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/code-repositories",
        &viewer,
        serde_json::json!({"name": "viewer-repo"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/v1/code-repositories/{id}"), &viewer).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_invalid_body_returns_422(pool: PgPool) {
    let (_, editor) = common::seed_editor(&pool).await;

    // Empty name fails DTO validation.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/code-repositories",
        &editor,
        serde_json::json!({"name": ""}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Malformed logo URL fails too.
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/code-repositories",
        &editor,
        serde_json::json!({"name": "models-repo", "logo_url": "not a url"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
