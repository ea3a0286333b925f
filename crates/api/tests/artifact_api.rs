//! HTTP-level integration tests for artifact endpoints and the
//! workspace-scoping constraints established by migration: cascade delete
//! with the workspace, set-null on user deletion, per-workspace name
//! uniqueness.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_defaults_to_default_workspace(pool: PgPool) {
    let (user_id, editor) = common::seed_editor(&pool).await;
    let default_id = common::default_workspace_id(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/artifacts",
        &editor,
        serde_json::json!({"name": "model-weights", "has_custom_name": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["workspace_id"], default_id.to_string());
    assert_eq!(json["data"]["user_id"], user_id.to_string());
    assert_eq!(json["data"]["has_custom_name"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_nested_create_and_scoped_list(pool: PgPool) {
    let (_, admin) = common::seed_admin(&pool).await;

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/workspaces",
        &admin,
        serde_json::json!({"name": "staging"}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/workspaces/staging/artifacts",
        &admin,
        serde_json::json!({"name": "dataset-v1"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/artifacts",
        &admin,
        serde_json::json!({"name": "dataset-v2"}),
    )
    .await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/workspaces/staging/artifacts", &admin).await).await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["items"][0]["name"], "dataset-v1");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_artifact_name(pool: PgPool) {
    let (_, editor) = common::seed_editor(&pool).await;

    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/v1/artifacts",
            &editor,
            serde_json::json!({"name": "model-weights"}),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/artifacts/{id}"),
        &editor,
        serde_json::json!({"name": "model-weights-final", "has_custom_name": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "model-weights-final");
    assert_eq!(json["data"]["has_custom_name"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_name_in_workspace_returns_409(pool: PgPool) {
    let (_, editor) = common::seed_editor(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/artifacts",
        &editor,
        serde_json::json!({"name": "model-weights"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/artifacts",
        &editor,
        serde_json::json!({"name": "model-weights"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_deleting_workspace_cascades_to_artifacts(pool: PgPool) {
    let (_, admin) = common::seed_admin(&pool).await;

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/workspaces",
        &admin,
        serde_json::json!({"name": "doomed"}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/v1/workspaces/doomed/artifacts",
            &admin,
            serde_json::json!({"name": "orphan-to-be"}),
        )
        .await,
    )
    .await;
    let artifact_id = created["data"]["id"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let response = delete(app, "/api/v1/workspaces/doomed", &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/artifacts/{artifact_id}"), &admin).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_deleting_owner_nulls_user_id(pool: PgPool) {
    let (_, admin) = common::seed_admin(&pool).await;
    let (editor_id, editor) = common::seed_editor(&pool).await;

    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/v1/artifacts",
            &editor,
            serde_json::json!({"name": "model-weights"}),
        )
        .await,
    )
    .await;
    let artifact_id = created["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(created["data"]["user_id"], editor_id.to_string());

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/users/{editor_id}"), &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The artifact survives with its owner cleared.
    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/artifacts/{artifact_id}"), &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user_id"], serde_json::Value::Null);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_pagination_math(pool: PgPool) {
    let (_, editor) = common::seed_editor(&pool).await;

    for i in 0..5 {
        let app = common::build_test_app(pool.clone());
        post_json(
            app,
            "/api/v1/artifacts",
            &editor,
            serde_json::json!({"name": format!("artifact-{i}")}),
        )
        .await;
    }

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/v1/artifacts?page=2&size=2", &editor).await).await;
    assert_eq!(json["data"]["index"], 2);
    assert_eq!(json["data"]["max_size"], 2);
    assert_eq!(json["data"]["total"], 5);
    assert_eq!(json["data"]["total_pages"], 3);
    assert_eq!(json["data"]["items"].as_array().unwrap().len(), 2);

    // Out-of-range pages are empty but keep the totals.
    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/artifacts?page=9&size=2", &editor).await).await;
    assert_eq!(json["data"]["total"], 5);
    assert_eq!(json["data"]["items"].as_array().unwrap().len(), 0);
}
