//! Code repository entity model and DTOs.

use metaforge_core::types::{ResourceId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A code repository row from the `code_repositories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CodeRepository {
    pub id: ResourceId,
    pub name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    /// Integration-specific configuration (tokens, URLs, owner/repo pairs).
    pub config: serde_json::Value,
    /// Source hint for the client-side integration implementation.
    pub source: Option<serde_json::Value>,
    pub workspace_id: ResourceId,
    pub user_id: Option<ResourceId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a code repository.
///
/// `workspace` may be omitted: the root-level create endpoint then attaches
/// the repository to the default workspace, and the workspace-nested
/// endpoint overwrites it with the workspace resolved from the URL.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCodeRepository {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    #[validate(url)]
    pub logo_url: Option<String>,
    pub config: Option<serde_json::Value>,
    pub source: Option<serde_json::Value>,
    pub workspace: Option<ResourceId>,
}

/// DTO for updating a code repository. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCodeRepository {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(url)]
    pub logo_url: Option<String>,
    pub config: Option<serde_json::Value>,
    pub source: Option<serde_json::Value>,
}

/// Query parameters for listing code repositories.
#[derive(Debug, Default, Deserialize)]
pub struct CodeRepositoryFilter {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub name: Option<String>,
    pub workspace_id: Option<ResourceId>,
    pub user_id: Option<ResourceId>,
}

impl CodeRepositoryFilter {
    /// Pin the filter to a single workspace, overriding any
    /// client-supplied `workspace_id`.
    pub fn scope_to_workspace(&mut self, workspace_id: ResourceId) {
        self.workspace_id = Some(workspace_id);
    }
}
