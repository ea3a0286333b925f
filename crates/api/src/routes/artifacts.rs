//! Route definitions for artifacts.

use axum::routing::get;
use axum::Router;

use crate::handlers::artifact;
use crate::state::AppState;

/// Routes mounted at `/artifacts`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create
/// GET    /{id}  -> get_by_id
/// PUT    /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(artifact::list).post(artifact::create))
        .route(
            "/{id}",
            get(artifact::get_by_id)
                .put(artifact::update)
                .delete(artifact::delete),
        )
}
