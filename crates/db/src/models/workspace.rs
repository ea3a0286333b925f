//! Workspace entity model and DTOs.

use metaforge_core::types::{ResourceId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A workspace row from the `workspaces` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Workspace {
    pub id: ResourceId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new workspace.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateWorkspace {
    #[validate(
        length(min = 1, max = 255),
        custom(function = validate_workspace_name)
    )]
    pub name: String,
    pub description: Option<String>,
}

/// DTO for updating an existing workspace. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateWorkspace {
    #[validate(
        length(min = 1, max = 255),
        custom(function = validate_workspace_name)
    )]
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Query parameters for listing workspaces.
#[derive(Debug, Default, Deserialize)]
pub struct WorkspaceFilter {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub name: Option<String>,
}

/// Workspace names share a URL segment with workspace UUIDs, so a name that
/// parses as a UUID would be unreachable by name.
fn validate_workspace_name(name: &str) -> Result<(), ValidationError> {
    if Uuid::parse_str(name).is_ok() {
        return Err(ValidationError::new("workspace_name_is_uuid")
            .with_message("workspace names must not be valid UUIDs".into()));
    }
    Ok(())
}
