//! Workspace reference parsing and default-workspace constants.
//!
//! Workspace-nested URLs carry a `{workspace_name_or_id}` segment that may be
//! either a workspace UUID or a workspace name. [`WorkspaceRef`] captures the
//! distinction so resolution can hit the right lookup.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// Name of the workspace every unscoped row is attached to, unless
/// overridden via [`ENV_DEFAULT_WORKSPACE_NAME`].
pub const DEFAULT_WORKSPACE_NAME: &str = "default";

/// Environment variable overriding [`DEFAULT_WORKSPACE_NAME`].
pub const ENV_DEFAULT_WORKSPACE_NAME: &str = "METAFORGE_DEFAULT_WORKSPACE_NAME";

/// A URL-supplied workspace identifier: a UUID or a name.
///
/// Parsing never fails: anything that is not a valid UUID is treated as a
/// name. Workspace names that themselves look like UUIDs are not supported,
/// matching the resolution rule of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceRef {
    Id(Uuid),
    Name(String),
}

impl WorkspaceRef {
    /// Parse a URL segment: valid UUIDs become [`WorkspaceRef::Id`],
    /// everything else a [`WorkspaceRef::Name`].
    pub fn parse(segment: &str) -> Self {
        match Uuid::parse_str(segment) {
            Ok(id) => WorkspaceRef::Id(id),
            Err(_) => WorkspaceRef::Name(segment.to_string()),
        }
    }
}

impl FromStr for WorkspaceRef {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(WorkspaceRef::parse(s))
    }
}

impl fmt::Display for WorkspaceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkspaceRef::Id(id) => write!(f, "{id}"),
            WorkspaceRef::Name(name) => f.write_str(name),
        }
    }
}

impl<'de> serde::Deserialize<'de> for WorkspaceRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(WorkspaceRef::parse(&s))
    }
}
