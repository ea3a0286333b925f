//! Handlers for user management endpoints.
//!
//! The permission matrix makes create admin-only; list and get are
//! readable by every authenticated role.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use metaforge_core::types::ResourceId;
use metaforge_db::models::user::{CreateUser, UserFilter};
use metaforge_db::repositories::UserRepo;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::rbac::guard;
use crate::rbac::permissions::ResourceType;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/users
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<UserFilter>,
) -> AppResult<impl IntoResponse> {
    let page = guard::list_entities(&auth, ResourceType::User, || {
        UserRepo::list(&state.pool, &filter)
    })
    .await?;
    Ok(Json(DataResponse { data: page }))
}

/// POST /api/v1/users
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = guard::create_entity(&auth, ResourceType::User, || {
        UserRepo::create(&state.pool, &input, &password_hash)
    })
    .await?;

    tracing::info!(user_id = %user.id, name = %user.name, role = %user.role, "User created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

/// DELETE /api/v1/users/{id}
///
/// Rows owned by the user survive with `user_id` cleared by the database.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<ResourceId>,
) -> AppResult<impl IntoResponse> {
    guard::delete_entity(&auth, ResourceType::User, id, || {
        UserRepo::delete(&state.pool, id)
    })
    .await?;

    tracing::info!(user_id = %id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<ResourceId>,
) -> AppResult<impl IntoResponse> {
    let user = guard::get_entity(&auth, ResourceType::User, id, || {
        UserRepo::find_by_id(&state.pool, id)
    })
    .await?;
    Ok(Json(DataResponse { data: user }))
}
