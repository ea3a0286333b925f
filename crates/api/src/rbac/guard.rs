//! Checked CRUD dispatch.
//!
//! Every entity endpoint funnels through one of these helpers: check the
//! permission matrix, run the supplied repository operation, and translate
//! missing rows into 404s. The generic shape keeps handlers down to
//! "resolve inputs, hand the guard a closure".

use std::future::Future;

use metaforge_core::error::CoreError;
use metaforge_core::pagination::Page;
use metaforge_core::types::ResourceId;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::rbac::permissions::{self, Action, ResourceType};

fn not_found(resource: ResourceType, id: ResourceId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: resource.as_str(),
        id,
    })
}

/// Check `Create` permission, then run the insert.
pub async fn create_entity<T, F, Fut>(
    auth: &AuthUser,
    resource: ResourceType,
    create: F,
) -> AppResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    permissions::require(auth, resource, Action::Create)?;
    Ok(create().await?)
}

/// Check `Read` permission, then fetch; a missing row is a 404.
pub async fn get_entity<T, F, Fut>(
    auth: &AuthUser,
    resource: ResourceType,
    id: ResourceId,
    fetch: F,
) -> AppResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Option<T>, sqlx::Error>>,
{
    permissions::require(auth, resource, Action::Read)?;
    fetch().await?.ok_or_else(|| not_found(resource, id))
}

/// Check `Read` permission, then run the (already scoped) list query.
pub async fn list_entities<T, F, Fut>(
    auth: &AuthUser,
    resource: ResourceType,
    list: F,
) -> AppResult<Page<T>>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Page<T>, sqlx::Error>>,
{
    permissions::require(auth, resource, Action::Read)?;
    Ok(list().await?)
}

/// Check `Update` permission, then apply; a missing row is a 404.
pub async fn update_entity<T, F, Fut>(
    auth: &AuthUser,
    resource: ResourceType,
    id: ResourceId,
    update: F,
) -> AppResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Option<T>, sqlx::Error>>,
{
    permissions::require(auth, resource, Action::Update)?;
    update().await?.ok_or_else(|| not_found(resource, id))
}

/// Check `Delete` permission, then delete; zero affected rows is a 404.
pub async fn delete_entity<F, Fut>(
    auth: &AuthUser,
    resource: ResourceType,
    id: ResourceId,
    delete: F,
) -> AppResult<()>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<bool, sqlx::Error>>,
{
    permissions::require(auth, resource, Action::Delete)?;
    if delete().await? {
        Ok(())
    } else {
        Err(not_found(resource, id))
    }
}
