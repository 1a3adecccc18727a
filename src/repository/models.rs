use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classifier::BotKind;

/// One persisted row representing a single classified inbound request.
///
/// Visits are immutable after creation; there is no update path and no
/// reclassification of `bot_type` after the fact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visit {
    pub id: Uuid,
    pub project_id: String,
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub user_agent: Option<String>,
    /// One of the classifier labels, or "unknown"
    pub bot_type: String,
}

impl Visit {
    /// Build a visit record at ingestion time
    pub fn new(
        project_id: String,
        url: String,
        user_agent: Option<String>,
        bot_kind: BotKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            url,
            timestamp: Utc::now(),
            user_agent,
            bot_type: bot_kind.as_str().to_string(),
        }
    }
}

/// Tenant entity that visit records are scoped to via a foreign key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub domain: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StorageConfig {
    pub storage_type: String,
    pub persistent: bool,
}
