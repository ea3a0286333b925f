//! Repository for the `users` table.

use metaforge_core::pagination::{self, Page};
use metaforge_core::roles::ROLE_EDITOR;
use metaforge_core::types::ResourceId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User, UserFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, full_name, password_hash, role, active, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user with a pre-hashed password, returning the created
    /// row. If `role` is `None`, defaults to `editor`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateUser,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, full_name, password_hash, role)
             VALUES ($1, $2, $3, COALESCE($4, '{ROLE_EDITOR}'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.full_name)
            .bind(password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a user by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: ResourceId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by its unique name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE name = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List users matching the filter, newest first.
    pub async fn list(pool: &PgPool, filter: &UserFilter) -> Result<Page<User>, sqlx::Error> {
        let page = pagination::clamp_page(filter.page);
        let size = pagination::clamp_size(filter.size);

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE ($1::text IS NULL OR name = $1)")
                .bind(&filter.name)
                .fetch_one(pool)
                .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE ($1::text IS NULL OR name = $1)
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        let items = sqlx::query_as::<_, User>(&query)
            .bind(&filter.name)
            .bind(size)
            .bind(pagination::offset(page, size))
            .fetch_all(pool)
            .await?;

        Ok(Page::new(page, size, total, items))
    }

    /// Total number of users. Used by startup bootstrap to decide whether
    /// the initial admin must be created.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
    }

    /// Delete a user by ID. Returns `true` if a row was removed.
    ///
    /// Owned rows keep existing with `user_id` set to NULL by the database.
    pub async fn delete(pool: &PgPool, id: ResourceId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
