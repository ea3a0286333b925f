//! Handlers for artifact endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use metaforge_core::types::ResourceId;
use metaforge_core::workspace::WorkspaceRef;
use metaforge_db::models::artifact::{ArtifactFilter, CreateArtifact, UpdateArtifact};
use metaforge_db::repositories::ArtifactRepo;

use crate::error::AppResult;
use crate::handlers::workspace::{default_workspace, resolve_workspace};
use crate::middleware::auth::AuthUser;
use crate::rbac::guard;
use crate::rbac::permissions::ResourceType;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/artifacts
///
/// Without an explicit `workspace` in the body, the artifact lands in the
/// default workspace.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateArtifact>,
) -> AppResult<impl IntoResponse> {
    let workspace_id = match input.workspace {
        Some(id) => resolve_workspace(&state.pool, &WorkspaceRef::Id(id)).await?.id,
        None => default_workspace(&state).await?.id,
    };
    create_scoped(auth, state, input, workspace_id).await
}

/// POST /api/v1/workspaces/{workspace_name_or_id}/artifacts
///
/// The resolved workspace overrides whatever the body says.
pub async fn create_in_workspace(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_ref): Path<WorkspaceRef>,
    Json(input): Json<CreateArtifact>,
) -> AppResult<impl IntoResponse> {
    let workspace = resolve_workspace(&state.pool, &workspace_ref).await?;
    create_scoped(auth, state, input, workspace.id).await
}

async fn create_scoped(
    auth: AuthUser,
    state: AppState,
    input: CreateArtifact,
    workspace_id: ResourceId,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let artifact = guard::create_entity(&auth, ResourceType::Artifact, || {
        ArtifactRepo::create(&state.pool, &input, workspace_id, Some(auth.user_id))
    })
    .await?;

    tracing::info!(
        artifact_id = %artifact.id,
        workspace_id = %workspace_id,
        name = %artifact.name,
        "Artifact registered"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: artifact })))
}

/// GET /api/v1/artifacts
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<ArtifactFilter>,
) -> AppResult<impl IntoResponse> {
    list_scoped(auth, state, filter).await
}

/// GET /api/v1/workspaces/{workspace_name_or_id}/artifacts
///
/// The resolved workspace overrides any `workspace_id` query parameter.
pub async fn list_in_workspace(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_ref): Path<WorkspaceRef>,
    Query(mut filter): Query<ArtifactFilter>,
) -> AppResult<impl IntoResponse> {
    let workspace = resolve_workspace(&state.pool, &workspace_ref).await?;
    filter.scope_to_workspace(workspace.id);
    list_scoped(auth, state, filter).await
}

async fn list_scoped(
    auth: AuthUser,
    state: AppState,
    filter: ArtifactFilter,
) -> AppResult<impl IntoResponse> {
    let page = guard::list_entities(&auth, ResourceType::Artifact, || {
        ArtifactRepo::list(&state.pool, &filter)
    })
    .await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/artifacts/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<ResourceId>,
) -> AppResult<impl IntoResponse> {
    let artifact = guard::get_entity(&auth, ResourceType::Artifact, id, || {
        ArtifactRepo::find_by_id(&state.pool, id)
    })
    .await?;
    Ok(Json(DataResponse { data: artifact }))
}

/// PUT /api/v1/artifacts/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<ResourceId>,
    Json(input): Json<UpdateArtifact>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let artifact = guard::update_entity(&auth, ResourceType::Artifact, id, || {
        ArtifactRepo::update(&state.pool, id, &input)
    })
    .await?;

    tracing::info!(artifact_id = %artifact.id, "Artifact updated");
    Ok(Json(DataResponse { data: artifact }))
}

/// DELETE /api/v1/artifacts/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<ResourceId>,
) -> AppResult<impl IntoResponse> {
    guard::delete_entity(&auth, ResourceType::Artifact, id, || {
        ArtifactRepo::delete(&state.pool, id)
    })
    .await?;

    tracing::info!(artifact_id = %id, "Artifact deleted");
    Ok(StatusCode::NO_CONTENT)
}
