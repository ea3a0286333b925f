//! Persistence layer for the Metaforge metadata server.
//!
//! Exposes the connection pool helpers, the embedded migrator, entity
//! models, and one repository per table. Repositories are unit structs with
//! static async methods taking `&PgPool`, so callers stay free to compose
//! them inside their own transactions later if needed.

pub mod models;
pub mod repositories;

use metaforge_core::workspace::{DEFAULT_WORKSPACE_NAME, ENV_DEFAULT_WORKSPACE_NAME};
use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

/// Embedded migrations, applied in filename order.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations.
///
/// The artifact workspace-scoping migration needs to know which workspace to
/// backfill existing rows into. That name comes from the
/// `METAFORGE_DEFAULT_WORKSPACE_NAME` environment variable (falling back to
/// `default`), and is handed to the SQL through a session GUC on the same
/// connection the migrator runs on. The migration aborts if no workspace
/// with that name exists.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    let default_workspace = std::env::var(ENV_DEFAULT_WORKSPACE_NAME)
        .unwrap_or_else(|_| DEFAULT_WORKSPACE_NAME.to_string());

    let mut conn = pool.acquire().await?;
    sqlx::query("SELECT set_config('metaforge.default_workspace_name', $1, false)")
        .bind(&default_workspace)
        .execute(&mut *conn)
        .await?;

    tracing::debug!(default_workspace, "Applying database migrations");
    MIGRATOR.run(&mut *conn).await
}
