//! In-memory visit store
//!
//! Keeps everything in process memory behind an RwLock. Used by tests and
//! for running the service without a database; contents are lost on restart.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::errors::Result;
use crate::repository::models::StorageConfig;
use crate::repository::{Project, Visit, VisitRepository};

#[derive(Default)]
pub struct MemoryVisitStore {
    visits: RwLock<Vec<Visit>>,
    projects: RwLock<Vec<Project>>,
}

impl MemoryVisitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total rows across all projects
    pub async fn total_visits(&self) -> usize {
        self.visits.read().await.len()
    }
}

#[async_trait]
impl VisitRepository for MemoryVisitStore {
    async fn insert_visit(&self, visit: Visit) -> Result<()> {
        debug!("Inserting visit {} for project {}", visit.id, visit.project_id);
        self.visits.write().await.push(visit);
        Ok(())
    }

    async fn count_visits(&self, project_id: &str) -> Result<u64> {
        let count = self
            .visits
            .read()
            .await
            .iter()
            .filter(|v| v.project_id == project_id)
            .count();
        Ok(count as u64)
    }

    async fn recent_visits(&self, project_id: &str, limit: u64) -> Result<Vec<Visit>> {
        let mut visits: Vec<Visit> = self
            .visits
            .read()
            .await
            .iter()
            .filter(|v| v.project_id == project_id)
            .cloned()
            .collect();

        visits.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        visits.truncate(limit as usize);
        Ok(visits)
    }

    async fn create_project(&self, project: Project) -> Result<()> {
        let mut projects = self.projects.write().await;
        if !projects.iter().any(|p| p.id == project.id) {
            projects.push(project);
        }
        Ok(())
    }

    async fn get_backend_config(&self) -> StorageConfig {
        StorageConfig {
            storage_type: "memory".to_string(),
            persistent: false,
        }
    }
}
