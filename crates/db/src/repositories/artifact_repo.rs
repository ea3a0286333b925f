//! Repository for the `artifacts` table.

use metaforge_core::pagination::{self, Page};
use metaforge_core::types::ResourceId;
use sqlx::PgPool;

use crate::models::artifact::{Artifact, ArtifactFilter, CreateArtifact, UpdateArtifact};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, has_custom_name, workspace_id, user_id, created_at, updated_at";

/// Shared WHERE clause for filtered queries; NULL parameters disable the
/// corresponding condition.
const FILTER: &str = "($1::text IS NULL OR name = $1)
           AND ($2::uuid IS NULL OR workspace_id = $2)
           AND ($3::uuid IS NULL OR user_id = $3)";

/// Provides CRUD operations for artifacts.
pub struct ArtifactRepo;

impl ArtifactRepo {
    /// Insert a new artifact, returning the created row.
    ///
    /// The workspace is always resolved by the caller; `input.workspace` is
    /// deliberately ignored here so URL-scoped creation cannot be bypassed.
    pub async fn create(
        pool: &PgPool,
        input: &CreateArtifact,
        workspace_id: ResourceId,
        user_id: Option<ResourceId>,
    ) -> Result<Artifact, sqlx::Error> {
        let query = format!(
            "INSERT INTO artifacts (name, has_custom_name, workspace_id, user_id)
             VALUES ($1, COALESCE($2, FALSE), $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Artifact>(&query)
            .bind(&input.name)
            .bind(input.has_custom_name)
            .bind(workspace_id)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Find an artifact by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: ResourceId,
    ) -> Result<Option<Artifact>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM artifacts WHERE id = $1");
        sqlx::query_as::<_, Artifact>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List artifacts matching the filter, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &ArtifactFilter,
    ) -> Result<Page<Artifact>, sqlx::Error> {
        let page = pagination::clamp_page(filter.page);
        let size = pagination::clamp_size(filter.size);

        let count_query = format!("SELECT COUNT(*) FROM artifacts WHERE {FILTER}");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(&filter.name)
            .bind(filter.workspace_id)
            .bind(filter.user_id)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM artifacts
             WHERE {FILTER}
             ORDER BY created_at DESC
             LIMIT $4 OFFSET $5"
        );
        let items = sqlx::query_as::<_, Artifact>(&query)
            .bind(&filter.name)
            .bind(filter.workspace_id)
            .bind(filter.user_id)
            .bind(size)
            .bind(pagination::offset(page, size))
            .fetch_all(pool)
            .await?;

        Ok(Page::new(page, size, total, items))
    }

    /// Update an artifact. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: ResourceId,
        input: &UpdateArtifact,
    ) -> Result<Option<Artifact>, sqlx::Error> {
        let query = format!(
            "UPDATE artifacts SET
                name = COALESCE($2, name),
                has_custom_name = COALESCE($3, has_custom_name),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Artifact>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.has_custom_name)
            .fetch_optional(pool)
            .await
    }

    /// Delete an artifact by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: ResourceId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM artifacts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
