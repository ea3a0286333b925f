//! Handlers for code repository endpoints.
//!
//! Each endpoint exists in a root-level variant and (for create/list) a
//! workspace-nested variant. The nested variants resolve the URL's
//! workspace reference and pin the request or filter to that workspace
//! before delegating, so a body or query string can never point the
//! operation at a different tenant.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use metaforge_core::types::ResourceId;
use metaforge_core::workspace::WorkspaceRef;
use metaforge_db::models::code_repository::{
    CodeRepositoryFilter, CreateCodeRepository, UpdateCodeRepository,
};
use metaforge_db::repositories::CodeRepositoryRepo;

use crate::error::AppResult;
use crate::handlers::workspace::{default_workspace, resolve_workspace};
use crate::middleware::auth::AuthUser;
use crate::rbac::guard;
use crate::rbac::permissions::ResourceType;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/code-repositories
///
/// Without an explicit `workspace` in the body, the repository lands in the
/// default workspace.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCodeRepository>,
) -> AppResult<impl IntoResponse> {
    let workspace_id = match input.workspace {
        Some(id) => resolve_workspace(&state.pool, &WorkspaceRef::Id(id)).await?.id,
        None => default_workspace(&state).await?.id,
    };
    create_scoped(auth, state, input, workspace_id).await
}

/// POST /api/v1/workspaces/{workspace_name_or_id}/code-repositories
///
/// The resolved workspace overrides whatever the body says.
pub async fn create_in_workspace(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_ref): Path<WorkspaceRef>,
    Json(input): Json<CreateCodeRepository>,
) -> AppResult<impl IntoResponse> {
    let workspace = resolve_workspace(&state.pool, &workspace_ref).await?;
    create_scoped(auth, state, input, workspace.id).await
}

async fn create_scoped(
    auth: AuthUser,
    state: AppState,
    input: CreateCodeRepository,
    workspace_id: ResourceId,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let repository = guard::create_entity(&auth, ResourceType::CodeRepository, || {
        CodeRepositoryRepo::create(&state.pool, &input, workspace_id, Some(auth.user_id))
    })
    .await?;

    tracing::info!(
        code_repository_id = %repository.id,
        workspace_id = %workspace_id,
        name = %repository.name,
        "Code repository registered"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: repository })))
}

/// GET /api/v1/code-repositories
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<CodeRepositoryFilter>,
) -> AppResult<impl IntoResponse> {
    list_scoped(auth, state, filter).await
}

/// GET /api/v1/workspaces/{workspace_name_or_id}/code-repositories
///
/// The resolved workspace overrides any `workspace_id` query parameter.
pub async fn list_in_workspace(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_ref): Path<WorkspaceRef>,
    Query(mut filter): Query<CodeRepositoryFilter>,
) -> AppResult<impl IntoResponse> {
    let workspace = resolve_workspace(&state.pool, &workspace_ref).await?;
    filter.scope_to_workspace(workspace.id);
    list_scoped(auth, state, filter).await
}

async fn list_scoped(
    auth: AuthUser,
    state: AppState,
    filter: CodeRepositoryFilter,
) -> AppResult<impl IntoResponse> {
    let page = guard::list_entities(&auth, ResourceType::CodeRepository, || {
        CodeRepositoryRepo::list(&state.pool, &filter)
    })
    .await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/code-repositories/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<ResourceId>,
) -> AppResult<impl IntoResponse> {
    let repository = guard::get_entity(&auth, ResourceType::CodeRepository, id, || {
        CodeRepositoryRepo::find_by_id(&state.pool, id)
    })
    .await?;
    Ok(Json(DataResponse { data: repository }))
}

/// PUT /api/v1/code-repositories/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<ResourceId>,
    Json(input): Json<UpdateCodeRepository>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let repository = guard::update_entity(&auth, ResourceType::CodeRepository, id, || {
        CodeRepositoryRepo::update(&state.pool, id, &input)
    })
    .await?;

    tracing::info!(code_repository_id = %repository.id, "Code repository updated");
    Ok(Json(DataResponse { data: repository }))
}

/// DELETE /api/v1/code-repositories/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<ResourceId>,
) -> AppResult<impl IntoResponse> {
    guard::delete_entity(&auth, ResourceType::CodeRepository, id, || {
        CodeRepositoryRepo::delete(&state.pool, id)
    })
    .await?;

    tracing::info!(code_repository_id = %id, "Code repository deleted");
    Ok(StatusCode::NO_CONTENT)
}
