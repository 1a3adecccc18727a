//! Tracking endpoint tests
//!
//! Tests for the core ingestion path: payload validation, bot
//! classification, persistence and the four observable outcomes.

use std::sync::Arc;

use actix_web::http::{Method, StatusCode};
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use async_trait::async_trait;

use aivisor::api::cors::CorsPolicy;
use aivisor::api::services::track_routes;
use aivisor::errors::{AivisorError, Result};
use aivisor::repository::backends::MemoryVisitStore;
use aivisor::repository::{Project, StorageConfig, Visit, VisitRepository};

// =============================================================================
// Test Setup
// =============================================================================

/// Repository whose writes always fail, for the storage-error outcome
struct FailingStore;

#[async_trait]
impl VisitRepository for FailingStore {
    async fn insert_visit(&self, _visit: Visit) -> Result<()> {
        Err(AivisorError::database_operation("disk on fire"))
    }

    async fn count_visits(&self, _project_id: &str) -> Result<u64> {
        Err(AivisorError::database_operation("disk on fire"))
    }

    async fn recent_visits(&self, _project_id: &str, _limit: u64) -> Result<Vec<Visit>> {
        Err(AivisorError::database_operation("disk on fire"))
    }

    async fn create_project(&self, _project: Project) -> Result<()> {
        Err(AivisorError::database_operation("disk on fire"))
    }

    async fn get_backend_config(&self) -> StorageConfig {
        StorageConfig {
            storage_type: "failing".to_string(),
            persistent: false,
        }
    }
}

/// Create a test app over the given repository
macro_rules! track_app {
    ($repo:expr) => {{
        test::init_service(
            App::new()
                .app_data(web::Data::new($repo as Arc<dyn VisitRepository>))
                .app_data(web::Data::new(CorsPolicy::permissive()))
                .service(track_routes()),
        )
        .await
    }};
}

fn assert_cors_headers<B>(resp: &actix_web::dev::ServiceResponse<B>) {
    let headers = resp.headers();
    assert_eq!(
        headers.get("Access-Control-Allow-Origin").unwrap(),
        "*",
        "allow-origin"
    );
    assert_eq!(
        headers.get("Access-Control-Allow-Methods").unwrap(),
        "GET, POST, PUT, DELETE, OPTIONS",
        "allow-methods"
    );
    assert_eq!(
        headers.get("Access-Control-Allow-Headers").unwrap(),
        "Content-Type, Authorization",
        "allow-headers"
    );
    assert_eq!(
        headers.get("Access-Control-Max-Age").unwrap(),
        "86400",
        "max-age"
    );
}

// =============================================================================
// Preflight
// =============================================================================

#[tokio::test]
async fn test_options_returns_cors_headers() {
    let repo = Arc::new(MemoryVisitStore::new());
    let app = track_app!(repo.clone());

    let req = TestRequest::default()
        .method(Method::OPTIONS)
        .uri("/track")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_cors_headers(&resp);
    assert_eq!(repo.total_visits().await, 0);
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn test_missing_project_id_is_rejected() {
    let repo = Arc::new(MemoryVisitStore::new());
    let app = track_app!(repo.clone());

    let req = TestRequest::post()
        .uri("/track")
        .set_json(serde_json::json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_cors_headers(&resp);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Missing project ID");
    assert_eq!(repo.total_visits().await, 0);
}

#[tokio::test]
async fn test_empty_project_id_is_rejected() {
    let repo = Arc::new(MemoryVisitStore::new());
    let app = track_app!(repo.clone());

    let req = TestRequest::post()
        .uri("/track")
        .set_json(serde_json::json!({ "projectId": "", "userAgent": "GPTBot/1.0" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(repo.total_visits().await, 0);
}

#[tokio::test]
async fn test_malformed_json_is_an_internal_error() {
    let repo = Arc::new(MemoryVisitStore::new());
    let app = track_app!(repo.clone());

    let req = TestRequest::post()
        .uri("/track")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors_headers(&resp);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Internal server error");
    assert_eq!(repo.total_visits().await, 0);
}

// =============================================================================
// Non-bot traffic
// =============================================================================

#[tokio::test]
async fn test_non_bot_traffic_is_skipped_without_a_row() {
    let repo = Arc::new(MemoryVisitStore::new());
    let app = track_app!(repo.clone());

    let req = TestRequest::post()
        .uri("/track")
        .set_json(serde_json::json!({ "projectId": "p1", "userAgent": "curl/7.64" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_cors_headers(&resp);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Not an AI bot request");
    assert_eq!(repo.total_visits().await, 0);
}

#[tokio::test]
async fn test_missing_user_agent_is_skipped() {
    let repo = Arc::new(MemoryVisitStore::new());
    let app = track_app!(repo.clone());

    let req = TestRequest::post()
        .uri("/track")
        .set_json(serde_json::json!({ "projectId": "p1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(repo.total_visits().await, 0);
}

#[tokio::test]
async fn test_googlebot_is_not_gemini() {
    // The gemini category is exact-equality; a superstring must fall through
    let repo = Arc::new(MemoryVisitStore::new());
    let app = track_app!(repo.clone());

    let req = TestRequest::post()
        .uri("/track")
        .set_json(serde_json::json!({ "projectId": "p1", "userAgent": "Googlebot" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Not an AI bot request");
    assert_eq!(repo.total_visits().await, 0);
}

// =============================================================================
// Bot traffic
// =============================================================================

#[tokio::test]
async fn test_bot_visit_is_persisted() {
    let repo = Arc::new(MemoryVisitStore::new());
    let app = track_app!(repo.clone());

    let req = TestRequest::post()
        .uri("/track")
        .set_json(serde_json::json!({
            "projectId": "p1",
            "userAgent": "GPTBot/1.0",
            "url": "https://x.com/a"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_cors_headers(&resp);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);

    assert_eq!(repo.count_visits("p1").await.unwrap(), 1);
    let visits = repo.recent_visits("p1", 10).await.unwrap();
    assert_eq!(visits[0].bot_type, "chatgpt");
    assert_eq!(visits[0].url, "https://x.com/a");
    assert_eq!(visits[0].user_agent.as_deref(), Some("GPTBot/1.0"));
}

#[tokio::test]
async fn test_url_falls_back_to_request_url() {
    let repo = Arc::new(MemoryVisitStore::new());
    let app = track_app!(repo.clone());

    let req = TestRequest::post()
        .uri("/track")
        .set_json(serde_json::json!({
            "projectId": "p1",
            "userAgent": "Mozilla/5.0 (compatible; PerplexityBot/1.0)"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);

    let visits = repo.recent_visits("p1", 10).await.unwrap();
    assert_eq!(visits.len(), 1);
    assert_eq!(visits[0].bot_type, "perplexity");
    assert!(
        visits[0].url.contains("/track"),
        "fallback url should be the request url, got: {}",
        visits[0].url
    );
}

#[tokio::test]
async fn test_exact_gemini_match_is_persisted() {
    let repo = Arc::new(MemoryVisitStore::new());
    let app = track_app!(repo.clone());

    let req = TestRequest::post()
        .uri("/track")
        .set_json(serde_json::json!({ "projectId": "p1", "userAgent": "Google" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let visits = repo.recent_visits("p1", 10).await.unwrap();
    assert_eq!(visits.len(), 1);
    assert_eq!(visits[0].bot_type, "gemini");
}

#[tokio::test]
async fn test_duplicate_posts_produce_two_rows() {
    // No dedup key exists; identical requests are distinct visits
    let repo = Arc::new(MemoryVisitStore::new());
    let app = track_app!(repo.clone());

    for _ in 0..2 {
        let req = TestRequest::post()
            .uri("/track")
            .set_json(serde_json::json!({
                "projectId": "p1",
                "userAgent": "Claude-Web",
                "url": "https://x.com/a"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    assert_eq!(repo.count_visits("p1").await.unwrap(), 2);

    let visits = repo.recent_visits("p1", 10).await.unwrap();
    assert_ne!(visits[0].id, visits[1].id, "each row gets its own id");
}

// =============================================================================
// Storage failure
// =============================================================================

#[tokio::test]
async fn test_storage_failure_is_surfaced_as_500() {
    let repo = Arc::new(FailingStore);
    let app = track_app!(repo);

    let req = TestRequest::post()
        .uri("/track")
        .set_json(serde_json::json!({ "projectId": "p1", "userAgent": "GPTBot/1.0" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors_headers(&resp);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Failed to save tracking data");
}

#[tokio::test]
async fn test_storage_failure_not_reached_for_non_bot() {
    // The classifier short-circuits before any write is attempted
    let repo = Arc::new(FailingStore);
    let app = track_app!(repo);

    let req = TestRequest::post()
        .uri("/track")
        .set_json(serde_json::json!({ "projectId": "p1", "userAgent": "curl/7.64" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}
