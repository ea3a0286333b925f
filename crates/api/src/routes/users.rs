//! Route definitions for user management.

use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create (admin via permission matrix)
/// GET    /{id}  -> get_by_id
/// DELETE /{id}  -> delete (admin via permission matrix)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(user::list).post(user::create))
        .route("/{id}", get(user::get_by_id).delete(user::delete))
}
