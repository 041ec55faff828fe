use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use hashlink_core::{Identifier, Mapper, MapperError};
use hashlink_gateway::{App, AppState, RuntimeMode};
use hashlink_mapper::MappingService;
use hashlink_storage::InMemoryRepository;
use serde_json::{json, Value};
use tower::ServiceExt;

const EXAMPLE_COM: &str = "100680ad546ce6a577f42f52df33b4cfdca756859e664b8d7de329b150d09ce9";

fn app() -> Router {
    let service = MappingService::new(InMemoryRepository::new());
    App::router(AppState::new(Arc::new(service), RuntimeMode::Production))
}

/// A mapper whose storage is always down.
struct BrokenMapper;

#[async_trait]
impl Mapper for BrokenMapper {
    async fn create(&self, _url: String) -> Result<Identifier, MapperError> {
        Err(MapperError::Storage("connection refused".to_string()))
    }

    async fn resolve(&self, _identifier: &Identifier) -> Result<Option<String>, MapperError> {
        Err(MapperError::Storage("connection refused".to_string()))
    }
}

/// A mapper that panics instead of answering.
struct PanickingMapper;

#[async_trait]
impl Mapper for PanickingMapper {
    async fn create(&self, _url: String) -> Result<Identifier, MapperError> {
        panic!("create exploded");
    }

    async fn resolve(&self, _identifier: &Identifier) -> Result<Option<String>, MapperError> {
        panic!("resolve exploded");
    }
}

fn app_with(mapper: impl Mapper, mode: RuntimeMode) -> Router {
    App::router(AppState::new(Arc::new(mapper), mode))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_reports_success_with_timestamp() {
    let (status, body) = send(&app(), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert!(body["message"].is_string());
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(timestamp.parse::<jiff::Timestamp>().is_ok());
}

#[tokio::test]
async fn health_ignores_storage_availability() {
    let app = app_with(BrokenMapper, RuntimeMode::Production);

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
}

#[tokio::test]
async fn create_returns_sha256_identifier() {
    let (status, body) = send(&app(), post_json("/", json!({ "url": "https://example.com" }))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({ "response": { "message": "Success", "shortURL": EXAMPLE_COM } })
    );
}

#[tokio::test]
async fn create_then_resolve_round_trips() {
    let app = app();

    let (_, created) = send(&app, post_json("/", json!({ "url": "https://example.com" }))).await;
    let short_url = created["response"]["shortURL"].as_str().unwrap();

    let (status, body) = send(&app, get(&format!("/{short_url}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "response": { "message": "Success", "url": "https://example.com" } })
    );
}

#[tokio::test]
async fn create_is_idempotent_on_identifier() {
    let app = app();

    let (first_status, first) =
        send(&app, post_json("/", json!({ "url": "https://example.com" }))).await;
    let (second_status, second) =
        send(&app, post_json("/", json!({ "url": "https://example.com" }))).await;

    assert_eq!(first_status, StatusCode::CREATED);
    assert_eq!(second_status, StatusCode::CREATED);
    assert_eq!(first["response"]["shortURL"], second["response"]["shortURL"]);
}

#[tokio::test]
async fn create_accepts_form_bodies() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("url=https%3A%2F%2Fexample.com"))
        .unwrap();

    let (status, body) = send(&app(), request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["response"]["shortURL"], json!(EXAMPLE_COM));
}

#[tokio::test]
async fn create_rejects_repeated_form_url() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("url=a&url=b"))
        .unwrap();

    let (status, body) = send(&app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["validation"]["body"]["message"],
        json!("\"url\" must be a string")
    );
}

#[tokio::test]
async fn resolve_miss_is_ok_with_failed_message() {
    let (status, body) = send(&app(), get(&format!("/{}", "f".repeat(64)))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "response": { "message": "Failed" } }));
}

#[tokio::test]
async fn resolve_accepts_malformed_identifiers() {
    let (status, body) = send(&app(), get("/not-a-hash")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"]["message"], json!("Failed"));
}

#[tokio::test]
async fn create_without_url_is_rejected_before_storage() {
    // BrokenMapper would turn any storage call into a 500.
    let app = app_with(BrokenMapper, RuntimeMode::Production);

    let (status, body) = send(&app, post_json("/", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["validation"]["body"]["keys"], json!(["url"]));
    assert_eq!(
        body["validation"]["body"]["message"],
        json!("\"url\" is required")
    );
}

#[tokio::test]
async fn create_rejects_non_string_and_extra_fields() {
    let app = app();

    let (status, body) = send(&app, post_json("/", json!({ "url": 7 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["validation"]["body"]["message"],
        json!("\"url\" must be a string")
    );

    let (status, body) = send(
        &app,
        post_json("/", json!({ "url": "https://example.com", "ttl": 60 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["validation"]["body"]["keys"], json!(["ttl"]));
}

#[tokio::test]
async fn create_rejects_malformed_json() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"url\": "))
        .unwrap();

    let (status, body) = send(&app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn create_without_content_type_fails_validation() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/")
        .body(Body::from("https://example.com"))
        .unwrap();

    let (status, body) = send(&app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["validation"]["body"]["message"],
        json!("\"url\" is required")
    );
}

#[tokio::test]
async fn resolve_tolerates_trailing_slash() {
    let app = app();

    send(&app, post_json("/", json!({ "url": "https://example.com" }))).await;

    let (status, body) = send(&app, get(&format!("/{EXAMPLE_COM}/"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"]["url"], json!("https://example.com"));

    let (status, body) = send(&app, get("/health/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
}

#[tokio::test]
async fn undecodable_identifier_uses_error_envelope() {
    let (status, body) = send(&app(), get("/%FF")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "success": false, "error": "Internal server error" })
    );

    let dev = app_with(
        MappingService::new(InMemoryRepository::new()),
        RuntimeMode::Development,
    );
    let (status, body) = send(&dev, get("/%FF")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn unmatched_route_is_404_with_path() {
    let (status, body) = send(&app(), get("/a/b/c?x=1")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["path"], json!("/a/b/c?x=1"));
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn wrong_method_on_known_path_is_404() {
    let app = app();

    let (status, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["path"], json!("/"));

    let request = Request::builder()
        .method(Method::DELETE)
        .uri(format!("/{EXAMPLE_COM}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn storage_failure_hides_message_in_production() {
    let app = app_with(BrokenMapper, RuntimeMode::Production);

    let (status, body) = send(&app, post_json("/", json!({ "url": "https://example.com" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "success": false, "error": "Internal server error" })
    );
}

#[tokio::test]
async fn storage_failure_exposes_message_in_development() {
    let app = app_with(BrokenMapper, RuntimeMode::Development);

    let (status, body) = send(&app, get(&format!("/{EXAMPLE_COM}"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], json!(false));
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("connection refused"));
}

#[tokio::test]
async fn handler_panic_becomes_internal_error() {
    let app = app_with(PanickingMapper, RuntimeMode::Development);

    let (status, body) = send(&app, get(&format!("/{EXAMPLE_COM}"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], json!("Internal server error"));
    assert_eq!(body["message"], json!("resolve exploded"));
}
