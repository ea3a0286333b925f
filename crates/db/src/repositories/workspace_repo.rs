//! Repository for the `workspaces` table.

use metaforge_core::pagination::{self, Page};
use metaforge_core::types::ResourceId;
use metaforge_core::workspace::WorkspaceRef;
use sqlx::PgPool;

use crate::models::workspace::{CreateWorkspace, UpdateWorkspace, Workspace, WorkspaceFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, created_at, updated_at";

/// Provides CRUD operations for workspaces plus name-or-id resolution.
pub struct WorkspaceRepo;

impl WorkspaceRepo {
    /// Insert a new workspace, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateWorkspace) -> Result<Workspace, sqlx::Error> {
        let query = format!(
            "INSERT INTO workspaces (name, description)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Workspace>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a workspace by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: ResourceId,
    ) -> Result<Option<Workspace>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workspaces WHERE id = $1");
        sqlx::query_as::<_, Workspace>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a workspace by its unique name.
    pub async fn find_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<Workspace>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workspaces WHERE name = $1");
        sqlx::query_as::<_, Workspace>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a URL-supplied workspace reference (UUID or name).
    pub async fn resolve(
        pool: &PgPool,
        workspace_ref: &WorkspaceRef,
    ) -> Result<Option<Workspace>, sqlx::Error> {
        match workspace_ref {
            WorkspaceRef::Id(id) => Self::find_by_id(pool, *id).await,
            WorkspaceRef::Name(name) => Self::find_by_name(pool, name).await,
        }
    }

    /// List workspaces matching the filter, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &WorkspaceFilter,
    ) -> Result<Page<Workspace>, sqlx::Error> {
        let page = pagination::clamp_page(filter.page);
        let size = pagination::clamp_size(filter.size);

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM workspaces WHERE ($1::text IS NULL OR name = $1)",
        )
        .bind(&filter.name)
        .fetch_one(pool)
        .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM workspaces
             WHERE ($1::text IS NULL OR name = $1)
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        let items = sqlx::query_as::<_, Workspace>(&query)
            .bind(&filter.name)
            .bind(size)
            .bind(pagination::offset(page, size))
            .fetch_all(pool)
            .await?;

        Ok(Page::new(page, size, total, items))
    }

    /// Update a workspace. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: ResourceId,
        input: &UpdateWorkspace,
    ) -> Result<Option<Workspace>, sqlx::Error> {
        let query = format!(
            "UPDATE workspaces SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Workspace>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a workspace by ID. Returns `true` if a row was removed.
    ///
    /// All workspace-scoped rows (code repositories, deployments,
    /// artifacts) are cascade-deleted by the database.
    pub async fn delete(pool: &PgPool, id: ResourceId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM workspaces WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
