//! User entity model and DTOs.

use metaforge_core::roles;
use metaforge_core::types::{ResourceId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// A user row from the `users` table.
///
/// The password hash never leaves the server; it is skipped on
/// serialization.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: ResourceId,
    pub name: String,
    pub full_name: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user. The plaintext password is hashed by the API
/// layer before it reaches the repository.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub full_name: Option<String>,
    #[validate(length(min = 8, max = 255))]
    pub password: String,
    /// Defaults to `editor` if omitted.
    #[validate(custom(function = validate_role))]
    pub role: Option<String>,
}

/// Query parameters for listing users.
#[derive(Debug, Default, Deserialize)]
pub struct UserFilter {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub name: Option<String>,
}

fn validate_role(role: &str) -> Result<(), ValidationError> {
    if !roles::is_valid_role(role) {
        return Err(ValidationError::new("unknown_role")
            .with_message("role must be one of: admin, editor, viewer".into()));
    }
    Ok(())
}
