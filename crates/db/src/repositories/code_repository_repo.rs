//! Repository for the `code_repositories` table.

use metaforge_core::pagination::{self, Page};
use metaforge_core::types::ResourceId;
use sqlx::PgPool;

use crate::models::code_repository::{
    CodeRepository, CodeRepositoryFilter, CreateCodeRepository, UpdateCodeRepository,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, logo_url, config, source, workspace_id, user_id, \
     created_at, updated_at";

/// Shared WHERE clause for filtered queries; NULL parameters disable the
/// corresponding condition.
const FILTER: &str = "($1::text IS NULL OR name = $1)
           AND ($2::uuid IS NULL OR workspace_id = $2)
           AND ($3::uuid IS NULL OR user_id = $3)";

/// Provides CRUD operations for code repositories.
pub struct CodeRepositoryRepo;

impl CodeRepositoryRepo {
    /// Insert a new code repository, returning the created row.
    ///
    /// The workspace is always resolved by the caller; `input.workspace` is
    /// deliberately ignored here so URL-scoped creation cannot be bypassed.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCodeRepository,
        workspace_id: ResourceId,
        user_id: Option<ResourceId>,
    ) -> Result<CodeRepository, sqlx::Error> {
        let query = format!(
            "INSERT INTO code_repositories
                 (name, description, logo_url, config, source, workspace_id, user_id)
             VALUES ($1, $2, $3, COALESCE($4, '{{}}'::jsonb), $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CodeRepository>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.logo_url)
            .bind(&input.config)
            .bind(&input.source)
            .bind(workspace_id)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a code repository by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: ResourceId,
    ) -> Result<Option<CodeRepository>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM code_repositories WHERE id = $1");
        sqlx::query_as::<_, CodeRepository>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List code repositories matching the filter, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &CodeRepositoryFilter,
    ) -> Result<Page<CodeRepository>, sqlx::Error> {
        let page = pagination::clamp_page(filter.page);
        let size = pagination::clamp_size(filter.size);

        let count_query = format!("SELECT COUNT(*) FROM code_repositories WHERE {FILTER}");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(&filter.name)
            .bind(filter.workspace_id)
            .bind(filter.user_id)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM code_repositories
             WHERE {FILTER}
             ORDER BY created_at DESC
             LIMIT $4 OFFSET $5"
        );
        let items = sqlx::query_as::<_, CodeRepository>(&query)
            .bind(&filter.name)
            .bind(filter.workspace_id)
            .bind(filter.user_id)
            .bind(size)
            .bind(pagination::offset(page, size))
            .fetch_all(pool)
            .await?;

        Ok(Page::new(page, size, total, items))
    }

    /// Update a code repository. Only non-`None` fields in `input` are
    /// applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: ResourceId,
        input: &UpdateCodeRepository,
    ) -> Result<Option<CodeRepository>, sqlx::Error> {
        let query = format!(
            "UPDATE code_repositories SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                logo_url = COALESCE($4, logo_url),
                config = COALESCE($5, config),
                source = COALESCE($6, source),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CodeRepository>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.logo_url)
            .bind(&input.config)
            .bind(&input.source)
            .fetch_optional(pool)
            .await
    }

    /// Delete a code repository by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: ResourceId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM code_repositories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
