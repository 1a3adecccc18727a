use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, trace};

use crate::repository::VisitRepository;

/// 存储后端信息
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthStorageCheck {
    pub status: String,
    pub storage_type: String,
    pub persistent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 健康检查响应
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub storage: HealthStorageCheck,
    pub response_time_ms: u32,
}

/// Health Service
///
/// Calls the repository directly instead of going through the tracking
/// path: probes need a fast, dependency-free answer.
pub struct HealthService;

impl HealthService {
    pub async fn health_check(
        repository: web::Data<Arc<dyn VisitRepository>>,
    ) -> impl Responder {
        let start_time = Instant::now();
        trace!("Received health check request");

        let backend_config = repository.get_backend_config().await;

        // Probe with a bounded count query; never load whole tables here
        let probe = tokio::time::timeout(
            Duration::from_secs(5),
            repository.count_visits("__health_probe__"),
        )
        .await;

        let storage = match probe {
            Ok(Ok(_)) => HealthStorageCheck {
                status: "healthy".to_string(),
                storage_type: backend_config.storage_type,
                persistent: backend_config.persistent,
                error: None,
            },
            Ok(Err(e)) => {
                error!("Storage health check failed: {}", e);
                HealthStorageCheck {
                    status: "unhealthy".to_string(),
                    storage_type: backend_config.storage_type,
                    persistent: backend_config.persistent,
                    error: Some(format!("database error: {}", e)),
                }
            }
            Err(_) => {
                error!("Storage health check timeout");
                HealthStorageCheck {
                    status: "unhealthy".to_string(),
                    storage_type: backend_config.storage_type,
                    persistent: backend_config.persistent,
                    error: Some("timeout".to_string()),
                }
            }
        };

        let is_healthy = storage.status == "healthy";

        let body = HealthResponse {
            status: storage.status.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            storage,
            response_time_ms: start_time.elapsed().as_millis() as u32,
        };

        let status_code = if is_healthy {
            actix_web::http::StatusCode::OK
        } else {
            actix_web::http::StatusCode::SERVICE_UNAVAILABLE
        };

        HttpResponse::build(status_code)
            .append_header(("Content-Type", "application/json; charset=utf-8"))
            .json(body)
    }

    // 活跃性检查，检查基本服务可用性
    pub async fn liveness_check() -> impl Responder {
        trace!("Received liveness check request");

        HttpResponse::NoContent().finish()
    }
}

/// Health 路由配置
pub fn health_routes() -> actix_web::Scope {
    web::scope("/healthz")
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
        .route("/live", web::get().to(HealthService::liveness_check))
        .route("/live", web::head().to(HealthService::liveness_check))
}
