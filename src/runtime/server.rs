//! Server mode
//!
//! This module contains the HTTP server startup logic.
//! It configures and starts the HTTP server with all necessary routes.

use actix_web::{App, HttpServer, middleware::Compress, web};
use anyhow::Result;
use std::sync::Arc;
use tracing::warn;

use crate::api::cors::CorsPolicy;
use crate::api::services::{health_routes, track_routes};
use crate::config::get_config;
use crate::repository::{RepositoryFactory, VisitRepository};

/// Run the HTTP server
///
/// **Note**: Configuration and logging must be initialized before calling
/// this function.
pub async fn run_server() -> Result<()> {
    let config = get_config();

    let repository: Arc<dyn VisitRepository> =
        RepositoryFactory::create().await.map_err(|e| {
            tracing::error!("Repository initialization failed: {}", e);
            anyhow::anyhow!(e)
        })?;

    // The ingestion endpoint is called from third-party customer sites, so
    // it always ships the permissive policy.
    let cors_policy = CorsPolicy::permissive();

    let cpu_count = config.server.cpu_count.min(32);
    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .app_data(web::Data::new(repository.clone()))
            .app_data(web::Data::new(cors_policy.clone()))
            .app_data(web::PayloadConfig::new(64 * 1024))
            .service(track_routes())
            .service(health_routes())
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(cpu_count)
    .bind(bind_address)?
    .run()
    .await?;

    Ok(())
}
