use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};
use crate::services::completion::CompletionClient;

pub mod recommendations;

/// Shared application state
///
/// The completion client is injected here so handlers and tests receive an
/// explicit dependency instead of a process-global handle.
#[derive(Clone)]
pub struct AppState {
    pub completion_client: Arc<dyn CompletionClient>,
}

impl AppState {
    pub fn new(completion_client: Arc<dyn CompletionClient>) -> Self {
        Self { completion_client }
    }
}

/// Creates the application router with all routes
///
/// The CORS layer answers preflight OPTIONS requests and stamps the
/// allow-all headers on every response, mirroring the open policy the
/// mobile client expects.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new().route("/recommendations", post(recommendations::recommend))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
