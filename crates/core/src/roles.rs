//! Well-known role name constants.
//!
//! These must match the CHECK constraint in
//! `20250115000002_create_users_table.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_VIEWER: &str = "viewer";

/// Returns true if `role` is one of the known role names.
pub fn is_valid_role(role: &str) -> bool {
    matches!(role, ROLE_ADMIN | ROLE_EDITOR | ROLE_VIEWER)
}
