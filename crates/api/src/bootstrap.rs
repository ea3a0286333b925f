//! Startup bootstrap: make sure a fresh deployment is usable.
//!
//! The default workspace is seeded by migration; the initial admin user
//! cannot be (its password hash is computed at runtime), so it is created
//! here when the `users` table is empty.

use metaforge_core::roles::ROLE_ADMIN;
use metaforge_db::models::user::CreateUser;
use metaforge_db::repositories::UserRepo;
use metaforge_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::ServerConfig;

/// Name of the bootstrap admin user.
pub const INITIAL_ADMIN_NAME: &str = "admin";

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing failed: {0}")]
    PasswordHash(argon2::password_hash::Error),
}

/// Create the initial admin user if no users exist yet.
///
/// The password comes from `METAFORGE_ADMIN_PASSWORD`; a warning is logged
/// when the built-in default is still in use.
pub async fn ensure_admin_user(
    pool: &DbPool,
    config: &ServerConfig,
) -> Result<(), BootstrapError> {
    if UserRepo::count(pool).await? > 0 {
        return Ok(());
    }

    let password_hash =
        hash_password(&config.initial_admin_password).map_err(BootstrapError::PasswordHash)?;

    let input = CreateUser {
        name: INITIAL_ADMIN_NAME.to_string(),
        full_name: None,
        password: config.initial_admin_password.clone(),
        role: Some(ROLE_ADMIN.to_string()),
    };
    let user = UserRepo::create(pool, &input, &password_hash).await?;

    if config.initial_admin_password == "admin" {
        tracing::warn!(
            user_id = %user.id,
            "Initial admin user created with the default password; set METAFORGE_ADMIN_PASSWORD"
        );
    } else {
        tracing::info!(user_id = %user.id, "Initial admin user created");
    }

    Ok(())
}
