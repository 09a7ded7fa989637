//! ヘルスAPI統合テスト（実ポートで起動）

use crate::support::{deck::app_state, http::spawn_router};
use agentdeck::api::create_app;
use agentdeck::registry::ServiceRegistry;
use reqwest::StatusCode;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn health_reports_services_in_registry_order() {
    let agent_api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&agent_api)
        .await;

    let mut registry = ServiceRegistry::new();
    registry.register("database", None);
    registry.register("redis", Some("redis://cache:6379".to_string()));
    registry.register("agent-api", Some(format!("{}/health", agent_api.uri())));

    let server = spawn_router(create_app(app_state(registry, None))).await;

    let response = reqwest::get(format!("{}/health", server.url()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    let names: Vec<&str> = body["services"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["redis", "agent-api"]);
    assert_eq!(body["services"][1]["details"]["data"]["status"], "ok");

    server.stop().await;
}

#[tokio::test]
async fn unreachable_service_returns_503() {
    let mut registry = ServiceRegistry::new();
    registry.register("agent-api", Some("http://127.0.0.1:1/health".to_string()));

    let server = spawn_router(create_app(app_state(registry, None))).await;

    let response = reqwest::get(format!("{}/health/detailed", server.url()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "unhealthy");
    assert!(body["system"]["memory"]["total"].is_u64());
    assert_eq!(body["environment"]["databaseConfigured"], false);

    server.stop().await;
}
