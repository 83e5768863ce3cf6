use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum::{
    body::Body,
    http::{Method, Request},
};
use axum_test::TestServer;
use serde_json::json;
use tower::ServiceExt;

use encontro_api::{
    error::{AppError, AppResult},
    routes::{create_router, AppState},
    services::completion::CompletionClient,
};

/// Scripted completion client: returns a fixed raw text or upstream
/// failure, counting how often it was called.
struct StubCompletionClient {
    reply: Result<String, u16>,
    calls: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl CompletionClient for StubCompletionClient {
    async fn complete(&self, _system: &str, _user: &str) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(AppError::UpstreamApi { status: *status }),
        }
    }
}

fn create_test_server(reply: Result<String, u16>) -> (TestServer, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let stub = StubCompletionClient {
        reply,
        calls: calls.clone(),
    };
    let state = AppState::new(Arc::new(stub));
    let app = create_router(state);
    (TestServer::new(app).unwrap(), calls)
}

const VALID_REPLY: &str = r#"{
    "recommendations": [
        {
            "name": "Restaurante Senac",
            "address": "Rua de Nazaré, 242 - Centro, São Luís - MA",
            "priceRange": "$$",
            "distanceKm": 2.1,
            "cuisineType": "Brasileira",
            "description": "Clássico do centro histórico [1].",
            "rating": 4.6,
            "openingHours": "Seg-Sab: 11h-15h",
            "romanticActivity": "Almoço a dois",
            "specialTip": "Chegue cedo",
            "temEstacionamento": true,
            "acessivel": true
        },
        {
            "name": "Cafofo da Tapioca",
            "address": "Av. São Marçal, 30 - João Paulo, São Luís - MA"
        }
    ]
}"#;

#[tokio::test]
async fn test_health_check() {
    let (server, _) = create_test_server(Ok(VALID_REPLY.to_string()));
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_recommendations_end_to_end() {
    let (server, calls) = create_test_server(Ok(VALID_REPLY.to_string()));

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "budget": "$$",
            "type": "gastronomia",
            "period": "dia",
            "latitude": -2.53,
            "longitude": -44.30
        }))
        .await;

    response.assert_status_ok();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let body: serde_json::Value = response.json();
    assert_eq!(body["totalFound"], 2);
    assert_eq!(body["source"], "perplexity-search");

    let places = body["places"].as_array().unwrap();
    assert_eq!(places.len(), 2);
    assert_eq!(places[0]["aiRecommended"], true);
    assert_eq!(places[0]["name"], "Restaurante Senac");
    // Citation markers never reach the client
    assert_eq!(places[0]["description"], "Clássico do centro histórico.");

    let map_url = places[0]["mapUrl"].as_str().unwrap();
    assert!(map_url.contains("Restaurante%20Senac"));
    assert!(map_url.contains("Rua%20de%20Nazar"));

    // Second record relies on defaults
    assert_eq!(places[1]["rating"], 0.0);
    assert_eq!(places[1]["openingHours"], "Consultar horários");
}

#[tokio::test]
async fn test_missing_latitude_is_rejected_before_the_ai_call() {
    let (server, calls) = create_test_server(Ok(VALID_REPLY.to_string()));

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "budget": "$$",
            "type": "gastronomia",
            "period": "dia",
            "longitude": -44.30
        }))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("latitude"));
}

#[tokio::test]
async fn test_empty_request_lists_all_missing_fields() {
    let (server, calls) = create_test_server(Ok(VALID_REPLY.to_string()));

    let response = server.post("/api/v1/recommendations").json(&json!({})).await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let error = response.json::<serde_json::Value>()["error"]
        .as_str()
        .unwrap()
        .to_string();
    for field in ["budget", "type", "period", "latitude", "longitude"] {
        assert!(error.contains(field), "missing '{}' in: {}", field, error);
    }
}

#[tokio::test]
async fn test_upstream_failure_surfaces_as_500() {
    let (server, calls) = create_test_server(Err(429));

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "budget": "$",
            "type": "casual",
            "period": "noite",
            "latitude": -2.53,
            "longitude": -44.30
        }))
        .await;

    response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("429"));
}

#[tokio::test]
async fn test_malformed_ai_output_surfaces_as_500() {
    let (server, _) = create_test_server(Ok("desculpe, não encontrei nada".to_string()));

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "budget": "$$$",
            "type": "cultura",
            "period": "noite",
            "latitude": -2.53,
            "longitude": -44.30
        }))
        .await;

    response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("Malformed"));
}

#[tokio::test]
async fn test_responses_echo_a_request_id() {
    let (server, _) = create_test_server(Ok(VALID_REPLY.to_string()));
    let response = server.get("/health").await;
    assert!(!response.header("x-request-id").is_empty());
}

#[tokio::test]
async fn test_preflight_gets_permissive_cors_headers() {
    let calls = Arc::new(AtomicUsize::new(0));
    let stub = StubCompletionClient {
        reply: Ok(VALID_REPLY.to_string()),
        calls,
    };
    let app = create_router(AppState::new(Arc::new(stub)));

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/v1/recommendations")
                .header("origin", "http://localhost:8081")
                .header("access-control-request-method", "POST")
                .header("access-control-request-headers", "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .map(|v| v.to_str().unwrap()),
        Some("*")
    );
}
