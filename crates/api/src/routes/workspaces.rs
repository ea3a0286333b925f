//! Route definitions for workspaces and workspace-nested resources.
//!
//! The `{workspace_name_or_id}` segment accepts either a workspace UUID or
//! a workspace name; the nested resource routes resolve it and rewrite the
//! request/filter scope before delegating to the shared handlers.

use axum::routing::get;
use axum::Router;

use crate::handlers::{artifact, code_repository, pipeline_deployment, workspace};
use crate::state::AppState;

/// Routes mounted at `/workspaces`.
///
/// ```text
/// GET    /                                             -> list
/// POST   /                                             -> create
/// GET    /{workspace_name_or_id}                       -> get_by_ref
/// PUT    /{workspace_name_or_id}                       -> update
/// DELETE /{workspace_name_or_id}                       -> delete
///
/// GET    /{workspace_name_or_id}/code-repositories     -> list_in_workspace
/// POST   /{workspace_name_or_id}/code-repositories     -> create_in_workspace
/// GET    /{workspace_name_or_id}/pipeline-deployments  -> list_in_workspace
/// POST   /{workspace_name_or_id}/pipeline-deployments  -> create_in_workspace
/// GET    /{workspace_name_or_id}/artifacts             -> list_in_workspace
/// POST   /{workspace_name_or_id}/artifacts             -> create_in_workspace
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(workspace::list).post(workspace::create))
        .route(
            "/{workspace_name_or_id}",
            get(workspace::get_by_ref)
                .put(workspace::update)
                .delete(workspace::delete),
        )
        .route(
            "/{workspace_name_or_id}/code-repositories",
            get(code_repository::list_in_workspace).post(code_repository::create_in_workspace),
        )
        .route(
            "/{workspace_name_or_id}/pipeline-deployments",
            get(pipeline_deployment::list_in_workspace)
                .post(pipeline_deployment::create_in_workspace),
        )
        .route(
            "/{workspace_name_or_id}/artifacts",
            get(artifact::list_in_workspace).post(artifact::create_in_workspace),
        )
}
