//! Login and current-user handlers.
//!
//! Login deliberately returns the same 401 for unknown names, inactive
//! accounts, and wrong passwords, so the endpoint does not leak which
//! usernames exist.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use metaforge_core::error::CoreError;
use metaforge_db::models::user::User;
use metaforge_db::repositories::UserRepo;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::rbac::guard;
use crate::rbac::permissions::ResourceType;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user: User,
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid credentials".into()))
}

/// POST /api/v1/auth/login (public)
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_name(&state.pool, &input.name)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !user.active {
        return Err(invalid_credentials());
    }

    let password_ok = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !password_ok {
        return Err(invalid_credentials());
    }

    let access_token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = %user.id, name = %user.name, "User logged in");
    Ok(Json(DataResponse {
        data: LoginResponse {
            access_token,
            token_type: "bearer",
            user,
        },
    }))
}

/// GET /api/v1/auth/me
pub async fn me(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let user = guard::get_entity(&auth, ResourceType::User, auth.user_id, || {
        UserRepo::find_by_id(&state.pool, auth.user_id)
    })
    .await?;
    Ok(Json(DataResponse { data: user }))
}
