//! Route definitions for code repositories.

use axum::routing::get;
use axum::Router;

use crate::handlers::code_repository;
use crate::state::AppState;

/// Routes mounted at `/code-repositories`.
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
        .route(
            "/",
            get(code_repository::list).post(code_repository::create),
        )
        .route(
            "/{id}",
            get(code_repository::get_by_id)
                .put(code_repository::update)
                .delete(code_repository::delete),
        )
}
