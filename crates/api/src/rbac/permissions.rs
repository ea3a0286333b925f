//! The static permission matrix: which role may perform which action on
//! which resource type.

use std::fmt;

use metaforge_core::error::CoreError;
use metaforge_core::roles::{ROLE_ADMIN, ROLE_EDITOR, ROLE_VIEWER};

use crate::error::AppError;
use crate::middleware::auth::AuthUser;

/// Entity families gated by RBAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Workspace,
    User,
    CodeRepository,
    PipelineDeployment,
    Artifact,
}

impl ResourceType {
    /// Stable lowercase name, used in error messages and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::Workspace => "workspace",
            ResourceType::User => "user",
            ResourceType::CodeRepository => "code_repository",
            ResourceType::PipelineDeployment => "pipeline_deployment",
            ResourceType::Artifact => "artifact",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CRUD verbs checked against the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `role` may perform `action` on `resource`.
///
/// - `admin`: everything.
/// - `editor`: full CRUD on workspace-scoped entities, read-only on
///   workspaces and users.
/// - `viewer`: read-only everywhere.
/// - unknown roles: nothing.
pub fn is_allowed(role: &str, resource: ResourceType, action: Action) -> bool {
    match role {
        ROLE_ADMIN => true,
        ROLE_EDITOR => match resource {
            ResourceType::Workspace | ResourceType::User => action == Action::Read,
            ResourceType::CodeRepository
            | ResourceType::PipelineDeployment
            | ResourceType::Artifact => true,
        },
        ROLE_VIEWER => action == Action::Read,
        _ => false,
    }
}

/// Check the matrix for the authenticated user, rejecting with 403 on
/// failure.
pub fn require(auth: &AuthUser, resource: ResourceType, action: Action) -> Result<(), AppError> {
    if is_allowed(&auth.role, resource, action) {
        return Ok(());
    }

    tracing::debug!(
        user_id = %auth.user_id,
        role = %auth.role,
        resource = %resource,
        action = %action,
        "Permission denied"
    );

    Err(AppError::Core(CoreError::Forbidden(format!(
        "Insufficient permissions to {action} {resource}"
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_can_do_everything() {
        for resource in [
            ResourceType::Workspace,
            ResourceType::User,
            ResourceType::CodeRepository,
            ResourceType::PipelineDeployment,
            ResourceType::Artifact,
        ] {
            for action in [Action::Create, Action::Read, Action::Update, Action::Delete] {
                assert!(is_allowed(ROLE_ADMIN, resource, action));
            }
        }
    }

    #[test]
    fn test_editor_is_read_only_on_workspaces_and_users() {
        assert!(is_allowed(ROLE_EDITOR, ResourceType::Workspace, Action::Read));
        assert!(!is_allowed(ROLE_EDITOR, ResourceType::Workspace, Action::Create));
        assert!(!is_allowed(ROLE_EDITOR, ResourceType::Workspace, Action::Delete));
        assert!(is_allowed(ROLE_EDITOR, ResourceType::User, Action::Read));
        assert!(!is_allowed(ROLE_EDITOR, ResourceType::User, Action::Create));
    }

    #[test]
    fn test_editor_has_full_crud_on_scoped_entities() {
        for resource in [
            ResourceType::CodeRepository,
            ResourceType::PipelineDeployment,
            ResourceType::Artifact,
        ] {
            for action in [Action::Create, Action::Read, Action::Update, Action::Delete] {
                assert!(is_allowed(ROLE_EDITOR, resource, action));
            }
        }
    }

    #[test]
    fn test_viewer_is_read_only() {
        assert!(is_allowed(ROLE_VIEWER, ResourceType::Artifact, Action::Read));
        assert!(!is_allowed(ROLE_VIEWER, ResourceType::Artifact, Action::Create));
        assert!(!is_allowed(ROLE_VIEWER, ResourceType::CodeRepository, Action::Delete));
    }

    #[test]
    fn test_unknown_role_is_denied() {
        assert!(!is_allowed("intern", ResourceType::Artifact, Action::Read));
    }
}
