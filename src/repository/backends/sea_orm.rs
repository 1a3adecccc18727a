use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, sea_query::OnConflict,
};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::errors::{AivisorError, Result};
use crate::repository::models::StorageConfig;
use crate::repository::{Project, Visit, VisitRepository};

use migration::entities::{ai_visit, project};
use migration::{Migrator, MigratorTrait};

#[derive(Clone)]
pub struct SeaOrmVisitStore {
    db: DatabaseConnection,
    backend_name: String,
}

impl SeaOrmVisitStore {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(AivisorError::database_config(
                "database_url is not set".to_string(),
            ));
        }

        let db = if backend_name == "sqlite" {
            Self::connect_sqlite(database_url).await?
        } else {
            Self::connect_generic(database_url, backend_name).await?
        };

        let store = SeaOrmVisitStore {
            db,
            backend_name: backend_name.to_string(),
        };

        store.run_migrations().await?;

        warn!(
            "{} visit store initialized.",
            store.backend_name.to_uppercase()
        );
        Ok(store)
    }

    /// Connect to SQLite with auto-create and performance pragmas
    async fn connect_sqlite(database_url: &str) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::SqlitePool;
        use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AivisorError::database_config(format!("Invalid SQLite URL: {}", e)))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePool::connect_with(opt).await.map_err(|e| {
            AivisorError::database_connection(format!("Failed to connect to SQLite: {}", e))
        })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// Connect to MySQL/PostgreSQL with pooling options
    async fn connect_generic(database_url: &str, backend_name: &str) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(database_url.to_owned());
        opt.max_connections(100)
            .min_connections(5)
            .connect_timeout(std::time::Duration::from_secs(8))
            .acquire_timeout(std::time::Duration::from_secs(8))
            .idle_timeout(std::time::Duration::from_secs(8))
            .sqlx_logging(false);

        Database::connect(opt).await.map_err(|e| {
            AivisorError::database_connection(format!(
                "Failed to connect to {}: {}",
                backend_name.to_uppercase(),
                e
            ))
        })
    }

    async fn run_migrations(&self) -> Result<()> {
        Migrator::up(&self.db, None)
            .await
            .map_err(|e| AivisorError::database_operation(format!("Migration failed: {}", e)))?;

        info!("Database migrations completed");
        Ok(())
    }

    fn model_to_visit(model: ai_visit::Model) -> Visit {
        Visit {
            id: Uuid::parse_str(&model.id).unwrap_or_else(|_| Uuid::nil()),
            project_id: model.project_id,
            url: model.url,
            timestamp: model.timestamp,
            user_agent: model.user_agent,
            bot_type: model.bot_type,
        }
    }

    fn visit_to_active_model(visit: &Visit) -> ai_visit::ActiveModel {
        use sea_orm::ActiveValue::Set;

        ai_visit::ActiveModel {
            id: Set(visit.id.to_string()),
            project_id: Set(visit.project_id.clone()),
            url: Set(visit.url.clone()),
            timestamp: Set(visit.timestamp),
            user_agent: Set(visit.user_agent.clone()),
            bot_type: Set(visit.bot_type.clone()),
        }
    }
}

#[async_trait]
impl VisitRepository for SeaOrmVisitStore {
    async fn insert_visit(&self, visit: Visit) -> Result<()> {
        let active_model = Self::visit_to_active_model(&visit);

        active_model.insert(&self.db).await.map_err(|e| {
            error!("Failed to insert visit {}: {}", visit.id, e);
            AivisorError::database_operation(format!("Failed to insert visit: {}", e))
        })?;

        Ok(())
    }

    async fn count_visits(&self, project_id: &str) -> Result<u64> {
        let count = ai_visit::Entity::find()
            .filter(ai_visit::Column::ProjectId.eq(project_id))
            .count(&self.db)
            .await
            .map_err(|e| {
                AivisorError::database_operation(format!("Failed to count visits: {}", e))
            })?;

        Ok(count)
    }

    async fn recent_visits(&self, project_id: &str, limit: u64) -> Result<Vec<Visit>> {
        let models = ai_visit::Entity::find()
            .filter(ai_visit::Column::ProjectId.eq(project_id))
            .order_by_desc(ai_visit::Column::Timestamp)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| {
                AivisorError::database_operation(format!("Failed to load visits: {}", e))
            })?;

        Ok(models.into_iter().map(Self::model_to_visit).collect())
    }

    async fn create_project(&self, proj: Project) -> Result<()> {
        use sea_orm::ActiveValue::Set;

        let active_model = project::ActiveModel {
            id: Set(proj.id.clone()),
            name: Set(proj.name),
            domain: Set(proj.domain),
            created_at: Set(proj.created_at),
        };

        // Re-registering the same project is a no-op
        project::Entity::insert(active_model)
            .on_conflict(
                OnConflict::column(project::Column::Id)
                    .do_nothing()
                    .to_owned(),
            )
            .do_nothing()
            .exec(&self.db)
            .await
            .map_err(|e| {
                AivisorError::database_operation(format!("Failed to create project: {}", e))
            })?;

        info!("Project registered: {}", proj.id);
        Ok(())
    }

    async fn get_backend_config(&self) -> StorageConfig {
        StorageConfig {
            storage_type: self.backend_name.clone(),
            persistent: true,
        }
    }
}
