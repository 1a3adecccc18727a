//! Tracking ingestion endpoint
//!
//! Receives fire-and-forget tracking events from instrumentation snippets
//! embedded in customer sites, classifies the User-Agent and persists one
//! visit row per confirmed AI-bot request. The caller treats every non-2xx
//! as "ignore and continue", so nothing here retries or queues.

use actix_web::dev::HttpServiceFactory;
use actix_web::http::{Method, StatusCode};
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::api::cors::CorsPolicy;
use crate::classifier::classify;
use crate::repository::{Visit, VisitRepository};

/// Inbound tracking payload. Every field is tolerated as absent; the
/// handler owns validation so it can answer with its own error bodies.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackPayload {
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrackAccepted {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrackSkipped {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrackError {
    pub error: String,
}

pub struct TrackService;

impl TrackService {
    /// Handle one tracking event: validate, classify, persist, reply.
    ///
    /// The body is taken as raw bytes rather than a typed extractor so that
    /// a malformed payload surfaces as this handler's own 500 (with CORS
    /// headers) instead of a framework-generated response without them.
    pub async fn handle_track(
        req: HttpRequest,
        body: web::Bytes,
        repository: web::Data<Arc<dyn VisitRepository>>,
        cors: web::Data<CorsPolicy>,
    ) -> impl Responder {
        debug!("Received tracking request");

        let payload: TrackPayload = match serde_json::from_slice(&body) {
            Ok(payload) => payload,
            Err(e) => {
                error!("Error processing tracking request: {}", e);
                return Self::respond(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &cors,
                    &TrackError {
                        error: "Internal server error".to_string(),
                    },
                );
            }
        };

        let project_id = match payload.project_id {
            Some(ref id) if !id.is_empty() => id.clone(),
            _ => {
                debug!("Tracking request rejected: missing project ID");
                return Self::respond(
                    StatusCode::BAD_REQUEST,
                    &cors,
                    &TrackError {
                        error: "Missing project ID".to_string(),
                    },
                );
            }
        };

        // Only confirmed-bot traffic is stored; ordinary human visits would
        // flood the table.
        let bot_kind = match classify(payload.user_agent.as_deref().unwrap_or_default()) {
            Some(kind) => kind,
            None => {
                debug!("Not an AI bot request");
                return Self::respond(
                    StatusCode::OK,
                    &cors,
                    &TrackSkipped {
                        message: "Not an AI bot request".to_string(),
                    },
                );
            }
        };

        let url = match payload.url {
            Some(ref url) if !url.is_empty() => url.clone(),
            _ => Self::request_url(&req),
        };

        let visit = Visit::new(project_id, url, payload.user_agent, bot_kind);

        match repository.insert_visit(visit).await {
            Ok(()) => {
                info!("Tracked {} visit", bot_kind);
                Self::respond(StatusCode::OK, &cors, &TrackAccepted { success: true })
            }
            Err(e) => {
                error!("Error inserting tracking data: {}", e);
                Self::respond(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &cors,
                    &TrackError {
                        error: "Failed to save tracking data".to_string(),
                    },
                )
            }
        }
    }

    /// Answer a preflight with an empty JSON body and the policy headers
    pub async fn handle_preflight(cors: web::Data<CorsPolicy>) -> impl Responder {
        let mut builder = HttpResponse::build(StatusCode::OK);
        cors.apply(&mut builder);
        builder.json(serde_json::json!({}))
    }

    fn respond<T: Serialize>(status: StatusCode, cors: &CorsPolicy, body: &T) -> HttpResponse {
        let mut builder = HttpResponse::build(status);
        cors.apply(&mut builder);
        builder.json(body)
    }

    /// Reconstruct the request URL, used when the payload carries no `url`
    fn request_url(req: &HttpRequest) -> String {
        let info = req.connection_info();
        format!("{}://{}{}", info.scheme(), info.host(), req.uri())
    }
}

/// Tracking 路由配置
pub fn track_routes() -> impl HttpServiceFactory {
    web::resource("/track")
        .route(web::post().to(TrackService::handle_track))
        .route(web::method(Method::OPTIONS).to(TrackService::handle_preflight))
}
