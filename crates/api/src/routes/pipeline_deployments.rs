//! Route definitions for pipeline deployments.

use axum::routing::get;
use axum::Router;

use crate::handlers::pipeline_deployment;
use crate::state::AppState;

/// Routes mounted at `/pipeline-deployments`.
///
/// ```text
/// GET    /            -> list
/// POST   /            -> create
/// GET    /{id}        -> get_by_id
/// DELETE /{id}        -> delete
/// GET    /{id}/logs   -> logs (only when the workload manager is enabled)
/// ```
pub fn router(workload_manager_enabled: bool) -> Router<AppState> {
    let mut router = Router::new()
        .route(
            "/",
            get(pipeline_deployment::list).post(pipeline_deployment::create),
        )
        .route(
            "/{id}",
            get(pipeline_deployment::get_by_id).delete(pipeline_deployment::delete),
        );

    if workload_manager_enabled {
        router = router.route("/{id}/logs", get(pipeline_deployment::logs));
    }

    router
}
