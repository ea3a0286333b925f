//! Artifact entity model and DTOs.

use metaforge_core::types::{ResourceId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// An artifact row from the `artifacts` table.
///
/// Artifacts are workspace-scoped: `workspace_id` is mandatory (cascade
/// deleted with the workspace) while `user_id` survives user deletion as
/// NULL.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Artifact {
    pub id: ResourceId,
    pub name: String,
    /// Whether the name was chosen by the user rather than generated.
    pub has_custom_name: bool,
    pub workspace_id: ResourceId,
    pub user_id: Option<ResourceId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering an artifact.
///
/// `workspace` may be omitted: the root-level create endpoint then attaches
/// the artifact to the default workspace, and the workspace-nested endpoint
/// overwrites it with the workspace resolved from the URL.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateArtifact {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub has_custom_name: Option<bool>,
    pub workspace: Option<ResourceId>,
}

/// DTO for updating an artifact. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateArtifact {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub has_custom_name: Option<bool>,
}

/// Query parameters for listing artifacts.
#[derive(Debug, Default, Deserialize)]
pub struct ArtifactFilter {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub name: Option<String>,
    pub workspace_id: Option<ResourceId>,
    pub user_id: Option<ResourceId>,
}

impl ArtifactFilter {
    /// Pin the filter to a single workspace, overriding any
    /// client-supplied `workspace_id`.
    pub fn scope_to_workspace(&mut self, workspace_id: ResourceId) {
        self.workspace_id = Some(workspace_id);
    }
}
