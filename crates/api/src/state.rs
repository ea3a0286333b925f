use std::sync::Arc;

use crate::config::ServerConfig;
use crate::workload::WorkloadManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: metaforge_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Workload manager backing the deployment logs endpoint.
    /// `None` when disabled in configuration; the logs route is then not
    /// registered at all.
    pub workload_manager: Option<Arc<dyn WorkloadManager>>,
}
