//! Workload manager seam.
//!
//! Deployment execution lives outside this server; the only surface exposed
//! here is log retrieval for the deployment logs endpoint. The trait keeps
//! the handler decoupled from whichever scheduler integration is wired in.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use metaforge_core::error::CoreError;
use metaforge_core::types::ResourceId;

/// Narrow interface to the external workload execution system.
#[async_trait]
pub trait WorkloadManager: Send + Sync {
    /// Fetch the accumulated logs for a workload (keyed by deployment id).
    async fn get_logs(&self, workload_id: ResourceId) -> Result<String, CoreError>;
}

/// In-process workload manager used for local development and tests.
///
/// Stores log lines in memory, keyed by workload id. Unknown ids yield an
/// empty log rather than an error: a deployment that never ran simply has
/// nothing to show.
#[derive(Default)]
pub struct InMemoryWorkloadManager {
    logs: RwLock<HashMap<ResourceId, String>>,
}

impl InMemoryWorkloadManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk of log output for a workload.
    pub fn append_logs(&self, workload_id: ResourceId, chunk: &str) {
        let mut logs = self.logs.write().expect("workload log lock poisoned");
        logs.entry(workload_id).or_default().push_str(chunk);
    }
}

#[async_trait]
impl WorkloadManager for InMemoryWorkloadManager {
    async fn get_logs(&self, workload_id: ResourceId) -> Result<String, CoreError> {
        let logs = self.logs.read().expect("workload log lock poisoned");
        Ok(logs.get(&workload_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_append_and_get_logs() {
        let manager = InMemoryWorkloadManager::new();
        let id = Uuid::now_v7();

        manager.append_logs(id, "step one\n");
        manager.append_logs(id, "step two\n");

        let logs = manager.get_logs(id).await.unwrap();
        assert_eq!(logs, "step one\nstep two\n");
    }

    #[tokio::test]
    async fn test_unknown_workload_has_empty_logs() {
        let manager = InMemoryWorkloadManager::new();
        let logs = manager.get_logs(Uuid::now_v7()).await.unwrap();
        assert!(logs.is_empty());
    }
}
