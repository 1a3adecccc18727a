use std::sync::Arc;

use tracing::error;

use crate::errors::{AivisorError, Result};

pub mod backends;
pub mod models;

pub use models::{Project, StorageConfig, Visit};

/// Narrow storage seam for the ingestion core.
///
/// `insert_visit` is the only operation the tracking path calls; the read
/// operations exist for the dashboard-facing surface and the health probe.
/// Implementations must be safe to share across actix workers.
#[async_trait::async_trait]
pub trait VisitRepository: Send + Sync {
    /// Persist one visit record. Exactly one row per call; no dedup.
    async fn insert_visit(&self, visit: Visit) -> Result<()>;

    /// Count stored visits for a project
    async fn count_visits(&self, project_id: &str) -> Result<u64>;

    /// Most recent visits for a project, newest first
    async fn recent_visits(&self, project_id: &str, limit: u64) -> Result<Vec<Visit>>;

    /// Create the tenant row that visits reference
    async fn create_project(&self, project: Project) -> Result<()>;

    async fn get_backend_config(&self) -> StorageConfig;
}

pub struct RepositoryFactory;

impl RepositoryFactory {
    pub async fn create() -> Result<Arc<dyn VisitRepository>> {
        let config = crate::config::get_config();
        let backend = &config.database.backend;
        let database_url = &config.database.database_url;

        match backend.as_str() {
            "sqlite" | "mysql" | "postgres" | "mariadb" => {
                let repository =
                    backends::sea_orm::SeaOrmVisitStore::new(database_url, backend).await?;
                Ok(Arc::new(repository) as Arc<dyn VisitRepository>)
            }
            "memory" => {
                let repository = backends::memory::MemoryVisitStore::new();
                Ok(Arc::new(repository) as Arc<dyn VisitRepository>)
            }
            _ => {
                error!("Unknown repository backend: {}", backend);
                Err(AivisorError::storage_plugin_not_found(format!(
                    "Unknown repository backend: {}. Supported: sqlite, mysql, postgres, mariadb, memory",
                    backend
                )))
            }
        }
    }
}
