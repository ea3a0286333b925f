//! Handlers for pipeline deployment endpoints.
//!
//! Deployments are immutable snapshots: create, list, get, delete, plus a
//! log-retrieval endpoint that is only mounted when the workload manager is
//! enabled.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use metaforge_core::error::CoreError;
use metaforge_core::types::ResourceId;
use metaforge_core::workspace::WorkspaceRef;
use metaforge_db::models::pipeline_deployment::{
    CreatePipelineDeployment, PipelineDeploymentFilter,
};
use metaforge_db::repositories::PipelineDeploymentRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::workspace::{default_workspace, resolve_workspace};
use crate::middleware::auth::AuthUser;
use crate::rbac::guard;
use crate::rbac::permissions::ResourceType;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/pipeline-deployments
///
/// Without an explicit `workspace` in the body, the deployment lands in the
/// default workspace.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePipelineDeployment>,
) -> AppResult<impl IntoResponse> {
    let workspace_id = match input.workspace {
        Some(id) => resolve_workspace(&state.pool, &WorkspaceRef::Id(id)).await?.id,
        None => default_workspace(&state).await?.id,
    };
    create_scoped(auth, state, input, workspace_id).await
}

/// POST /api/v1/workspaces/{workspace_name_or_id}/pipeline-deployments
///
/// The resolved workspace overrides whatever the body says.
pub async fn create_in_workspace(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_ref): Path<WorkspaceRef>,
    Json(input): Json<CreatePipelineDeployment>,
) -> AppResult<impl IntoResponse> {
    let workspace = resolve_workspace(&state.pool, &workspace_ref).await?;
    create_scoped(auth, state, input, workspace.id).await
}

async fn create_scoped(
    auth: AuthUser,
    state: AppState,
    input: CreatePipelineDeployment,
    workspace_id: ResourceId,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let deployment = guard::create_entity(&auth, ResourceType::PipelineDeployment, || {
        PipelineDeploymentRepo::create(&state.pool, &input, workspace_id, Some(auth.user_id))
    })
    .await?;

    tracing::info!(
        deployment_id = %deployment.id,
        workspace_id = %workspace_id,
        "Pipeline deployment created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: deployment })))
}

/// GET /api/v1/pipeline-deployments
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<PipelineDeploymentFilter>,
) -> AppResult<impl IntoResponse> {
    list_scoped(auth, state, filter).await
}

/// GET /api/v1/workspaces/{workspace_name_or_id}/pipeline-deployments
///
/// The resolved workspace overrides any `workspace_id` query parameter.
pub async fn list_in_workspace(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_ref): Path<WorkspaceRef>,
    Query(mut filter): Query<PipelineDeploymentFilter>,
) -> AppResult<impl IntoResponse> {
    let workspace = resolve_workspace(&state.pool, &workspace_ref).await?;
    filter.scope_to_workspace(workspace.id);
    list_scoped(auth, state, filter).await
}

async fn list_scoped(
    auth: AuthUser,
    state: AppState,
    filter: PipelineDeploymentFilter,
) -> AppResult<impl IntoResponse> {
    let page = guard::list_entities(&auth, ResourceType::PipelineDeployment, || {
        PipelineDeploymentRepo::list(&state.pool, &filter)
    })
    .await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/pipeline-deployments/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<ResourceId>,
) -> AppResult<impl IntoResponse> {
    let deployment = guard::get_entity(&auth, ResourceType::PipelineDeployment, id, || {
        PipelineDeploymentRepo::find_by_id(&state.pool, id)
    })
    .await?;
    Ok(Json(DataResponse { data: deployment }))
}

/// DELETE /api/v1/pipeline-deployments/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<ResourceId>,
) -> AppResult<impl IntoResponse> {
    guard::delete_entity(&auth, ResourceType::PipelineDeployment, id, || {
        PipelineDeploymentRepo::delete(&state.pool, id)
    })
    .await?;

    tracing::info!(deployment_id = %id, "Pipeline deployment deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/pipeline-deployments/{id}/logs
///
/// Only mounted when the workload manager is enabled; returns plain text.
pub async fn logs(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<ResourceId>,
) -> AppResult<String> {
    let deployment = guard::get_entity(&auth, ResourceType::PipelineDeployment, id, || {
        PipelineDeploymentRepo::find_by_id(&state.pool, id)
    })
    .await?;

    let manager = state.workload_manager.as_ref().ok_or_else(|| {
        AppError::Core(CoreError::Internal(
            "Workload manager is not configured".into(),
        ))
    })?;

    let logs = manager.get_logs(deployment.id).await.map_err(AppError::Core)?;
    Ok(logs)
}
