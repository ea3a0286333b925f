//! Handlers for workspace endpoints, plus the workspace resolution helpers
//! used by every workspace-nested route.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use metaforge_core::error::CoreError;
use metaforge_core::workspace::WorkspaceRef;
use metaforge_db::models::workspace::{CreateWorkspace, UpdateWorkspace, Workspace, WorkspaceFilter};
use metaforge_db::repositories::WorkspaceRepo;
use metaforge_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::rbac::guard;
use crate::rbac::permissions::{self, Action, ResourceType};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve a URL-supplied workspace reference to its row, mapping a miss to
/// a 404 that names the reference the way the client wrote it.
pub(crate) async fn resolve_workspace(
    pool: &DbPool,
    workspace_ref: &WorkspaceRef,
) -> Result<Workspace, AppError> {
    WorkspaceRepo::resolve(pool, workspace_ref)
        .await?
        .ok_or_else(|| match workspace_ref {
            WorkspaceRef::Id(id) => AppError::Core(CoreError::NotFound {
                entity: "workspace",
                id: *id,
            }),
            WorkspaceRef::Name(name) => AppError::Core(CoreError::NotFoundByName {
                entity: "workspace",
                name: name.clone(),
            }),
        })
}

/// The workspace unscoped create requests fall back to.
///
/// The row is seeded by migration, so a miss means the deployment is
/// misconfigured (e.g. the configured name points at a renamed workspace).
pub(crate) async fn default_workspace(state: &AppState) -> Result<Workspace, AppError> {
    let name = &state.config.default_workspace_name;
    WorkspaceRepo::find_by_name(&state.pool, name)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!("Default workspace '{name}' does not exist"))
        })
}

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// GET /api/v1/workspaces
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<WorkspaceFilter>,
) -> AppResult<impl IntoResponse> {
    let page = guard::list_entities(&auth, ResourceType::Workspace, || {
        WorkspaceRepo::list(&state.pool, &filter)
    })
    .await?;
    Ok(Json(DataResponse { data: page }))
}

/// POST /api/v1/workspaces
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateWorkspace>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let workspace = guard::create_entity(&auth, ResourceType::Workspace, || {
        WorkspaceRepo::create(&state.pool, &input)
    })
    .await?;

    tracing::info!(workspace_id = %workspace.id, name = %workspace.name, "Workspace created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: workspace })))
}

/// GET /api/v1/workspaces/{workspace_name_or_id}
pub async fn get_by_ref(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_ref): Path<WorkspaceRef>,
) -> AppResult<impl IntoResponse> {
    permissions::require(&auth, ResourceType::Workspace, Action::Read)?;
    let workspace = resolve_workspace(&state.pool, &workspace_ref).await?;
    Ok(Json(DataResponse { data: workspace }))
}

/// PUT /api/v1/workspaces/{workspace_name_or_id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_ref): Path<WorkspaceRef>,
    Json(input): Json<UpdateWorkspace>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let workspace = resolve_workspace(&state.pool, &workspace_ref).await?;
    let updated = guard::update_entity(&auth, ResourceType::Workspace, workspace.id, || {
        WorkspaceRepo::update(&state.pool, workspace.id, &input)
    })
    .await?;

    tracing::info!(workspace_id = %updated.id, "Workspace updated");
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/workspaces/{workspace_name_or_id}
///
/// The default workspace is protected: unscoped rows depend on it.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_ref): Path<WorkspaceRef>,
) -> AppResult<impl IntoResponse> {
    let workspace = resolve_workspace(&state.pool, &workspace_ref).await?;

    if workspace.name == state.config.default_workspace_name {
        return Err(AppError::Core(CoreError::Forbidden(
            "The default workspace cannot be deleted".into(),
        )));
    }

    guard::delete_entity(&auth, ResourceType::Workspace, workspace.id, || {
        WorkspaceRepo::delete(&state.pool, workspace.id)
    })
    .await?;

    tracing::info!(workspace_id = %workspace.id, name = %workspace.name, "Workspace deleted");
    Ok(StatusCode::NO_CONTENT)
}
