#![allow(dead_code)]

pub mod fakes;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use dealpulse_api::config::ServerConfig;
use dealpulse_api::router::build_app_router;
use dealpulse_api::state::AppState;
use dealpulse_db::DbPool;
use dealpulse_integrations::config::ServiceAvailability;
use dealpulse_integrations::IntegrationService;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        seed_sample_data: false,
    }
}

fn build_app(pool: DbPool, integrations: Option<Arc<IntegrationService>>) -> Router {
    let config = test_config();
    let configured = integrations.is_some();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        integrations,
        integration_availability: ServiceAvailability {
            hubspot: configured,
            gong: configured,
            openai: configured,
        },
    };
    build_app_router(state, &config)
}

/// The full application over `pool`, with integrations unconfigured.
pub fn build_test_app(pool: DbPool) -> Router {
    build_app(pool, None)
}

/// The full application with an integration service over fakes.
pub fn build_test_app_with_integrations(pool: DbPool, service: IntegrationService) -> Router {
    build_app(pool, Some(Arc::new(service)))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
