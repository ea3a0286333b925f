pub mod artifacts;
pub mod auth;
pub mod code_repositories;
pub mod health;
pub mod pipeline_deployments;
pub mod users;
pub mod workspaces;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                          login (public)
/// /auth/me                                             current user
///
/// /workspaces                                          list, create
/// /workspaces/{workspace_name_or_id}                   get, update, delete
/// /workspaces/{workspace_name_or_id}/code-repositories     list, create (scoped)
/// /workspaces/{workspace_name_or_id}/pipeline-deployments  list, create (scoped)
/// /workspaces/{workspace_name_or_id}/artifacts             list, create (scoped)
///
/// /code-repositories                                   list, create
/// /code-repositories/{id}                              get, update, delete
///
/// /pipeline-deployments                                list, create
/// /pipeline-deployments/{id}                           get, delete
/// /pipeline-deployments/{id}/logs                      logs (workload manager only)
///
/// /artifacts                                           list, create
/// /artifacts/{id}                                      get, update, delete
///
/// /users                                               list, create
/// /users/{id}                                          get, delete
/// ```
pub fn api_routes(workload_manager_enabled: bool) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/workspaces", workspaces::router())
        .nest("/code-repositories", code_repositories::router())
        .nest(
            "/pipeline-deployments",
            pipeline_deployments::router(workload_manager_enabled),
        )
        .nest("/artifacts", artifacts::router())
        .nest("/users", users::router())
}
