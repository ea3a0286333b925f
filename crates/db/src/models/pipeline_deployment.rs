//! Pipeline deployment entity model and DTOs.
//!
//! Deployments are immutable snapshots of a compiled pipeline: they are
//! created, listed, fetched, and deleted, but never updated.

use metaforge_core::types::{ResourceId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A deployment row from the `pipeline_deployments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PipelineDeployment {
    pub id: ResourceId,
    pub pipeline_name: Option<String>,
    /// Template used to name runs started from this deployment.
    pub run_name_template: String,
    pub pipeline_configuration: serde_json::Value,
    pub step_configurations: serde_json::Value,
    pub client_version: Option<String>,
    pub server_version: Option<String>,
    pub workspace_id: ResourceId,
    pub user_id: Option<ResourceId>,
    pub created_at: Timestamp,
}

/// DTO for creating a deployment.
///
/// `workspace` may be omitted: the root-level create endpoint then attaches
/// the deployment to the default workspace, and the workspace-nested
/// endpoint overwrites it with the workspace resolved from the URL.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePipelineDeployment {
    #[validate(length(min = 1, max = 255))]
    pub pipeline_name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub run_name_template: String,
    pub pipeline_configuration: serde_json::Value,
    pub step_configurations: Option<serde_json::Value>,
    pub client_version: Option<String>,
    pub server_version: Option<String>,
    pub workspace: Option<ResourceId>,
}

/// Query parameters for listing deployments.
#[derive(Debug, Default, Deserialize)]
pub struct PipelineDeploymentFilter {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub pipeline_name: Option<String>,
    pub workspace_id: Option<ResourceId>,
    pub user_id: Option<ResourceId>,
}

impl PipelineDeploymentFilter {
    /// Pin the filter to a single workspace, overriding any
    /// client-supplied `workspace_id`.
    pub fn scope_to_workspace(&mut self, workspace_id: ResourceId) {
        self.workspace_id = Some(workspace_id);
    }
}
