//! Repository for the `pipeline_deployments` table.

use metaforge_core::pagination::{self, Page};
use metaforge_core::types::ResourceId;
use sqlx::PgPool;

use crate::models::pipeline_deployment::{
    CreatePipelineDeployment, PipelineDeployment, PipelineDeploymentFilter,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, pipeline_name, run_name_template, pipeline_configuration, \
     step_configurations, client_version, server_version, workspace_id, user_id, created_at";

/// Shared WHERE clause for filtered queries; NULL parameters disable the
/// corresponding condition.
const FILTER: &str = "($1::text IS NULL OR pipeline_name = $1)
           AND ($2::uuid IS NULL OR workspace_id = $2)
           AND ($3::uuid IS NULL OR user_id = $3)";

/// Provides create/read/delete operations for deployments. Deployments are
/// immutable, so there is no update.
pub struct PipelineDeploymentRepo;

impl PipelineDeploymentRepo {
    /// Insert a new deployment, returning the created row.
    ///
    /// The workspace is always resolved by the caller; `input.workspace` is
    /// deliberately ignored here so URL-scoped creation cannot be bypassed.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePipelineDeployment,
        workspace_id: ResourceId,
        user_id: Option<ResourceId>,
    ) -> Result<PipelineDeployment, sqlx::Error> {
        let query = format!(
            "INSERT INTO pipeline_deployments
                 (pipeline_name, run_name_template, pipeline_configuration,
                  step_configurations, client_version, server_version, workspace_id, user_id)
             VALUES ($1, $2, $3, COALESCE($4, '{{}}'::jsonb), $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PipelineDeployment>(&query)
            .bind(&input.pipeline_name)
            .bind(&input.run_name_template)
            .bind(&input.pipeline_configuration)
            .bind(&input.step_configurations)
            .bind(&input.client_version)
            .bind(&input.server_version)
            .bind(workspace_id)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a deployment by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: ResourceId,
    ) -> Result<Option<PipelineDeployment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pipeline_deployments WHERE id = $1");
        sqlx::query_as::<_, PipelineDeployment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List deployments matching the filter, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &PipelineDeploymentFilter,
    ) -> Result<Page<PipelineDeployment>, sqlx::Error> {
        let page = pagination::clamp_page(filter.page);
        let size = pagination::clamp_size(filter.size);

        let count_query = format!("SELECT COUNT(*) FROM pipeline_deployments WHERE {FILTER}");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(&filter.pipeline_name)
            .bind(filter.workspace_id)
            .bind(filter.user_id)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM pipeline_deployments
             WHERE {FILTER}
             ORDER BY created_at DESC
             LIMIT $4 OFFSET $5"
        );
        let items = sqlx::query_as::<_, PipelineDeployment>(&query)
            .bind(&filter.pipeline_name)
            .bind(filter.workspace_id)
            .bind(filter.user_id)
            .bind(size)
            .bind(pagination::offset(page, size))
            .fetch_all(pool)
            .await?;

        Ok(Page::new(page, size, total, items))
    }

    /// Delete a deployment by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: ResourceId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pipeline_deployments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
