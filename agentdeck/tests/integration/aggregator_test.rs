//! アグリゲーター統合テスト（wiremock で依存サービスを模擬）

use crate::support::deck::aggregator;
use agentdeck::registry::ServiceRegistry;
use agentdeck::types::health::HealthStatus;
use serde_json::json;
use std::time::{Duration, Instant};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_health(status: u16, body: serde_json::Value) -> MockServer {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(&mock)
        .await;
    mock
}

#[tokio::test]
async fn all_services_ok_is_healthy() {
    let a = mock_health(200, json!({"status": "ok"})).await;
    let b = mock_health(200, json!({"status": "ok"})).await;

    let mut registry = ServiceRegistry::new();
    registry.register("agent-api", Some(format!("{}/health", a.uri())));
    registry.register("browser-worker", Some(format!("{}/health", b.uri())));

    let health = aggregator(registry, Duration::from_secs(2))
        .get_system_health()
        .await;

    assert_eq!(health.status, HealthStatus::Healthy);
    assert_eq!(health.services.len(), 2);
    assert!(health.services.iter().all(|s| s.error.is_none()));
}

#[tokio::test]
async fn non_ok_status_is_degraded_with_details() {
    let a = mock_health(200, json!({"status": "ok"})).await;
    let b = mock_health(500, json!({"reason": "db down"})).await;

    let mut registry = ServiceRegistry::new();
    registry.register("agent-api", Some(format!("{}/health", a.uri())));
    registry.register("mcp-server", Some(format!("{}/health", b.uri())));

    let health = aggregator(registry, Duration::from_secs(2))
        .get_system_health()
        .await;

    assert_eq!(health.status, HealthStatus::Degraded);
    let mcp = &health.services[1];
    assert_eq!(mcp.name, "mcp-server");
    assert_eq!(mcp.status, HealthStatus::Degraded);
    assert!(mcp.error.as_deref().unwrap().contains("500"));
    let details = mcp.details.as_ref().unwrap();
    assert_eq!(details["statusCode"], 500);
    assert_eq!(details["data"]["reason"], "db down");
}

#[tokio::test]
async fn not_found_is_degraded() {
    let mock = MockServer::start().await;

    let mut registry = ServiceRegistry::new();
    registry.register("agent-api", Some(format!("{}/health", mock.uri())));

    let health = aggregator(registry, Duration::from_secs(2))
        .get_system_health()
        .await;

    assert_eq!(health.status, HealthStatus::Degraded);
    assert_eq!(health.services[0].details.as_ref().unwrap()["statusCode"], 404);
}

#[tokio::test]
async fn slow_service_times_out_as_unhealthy() {
    let slow = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&slow)
        .await;
    let fast = mock_health(200, json!({"status": "ok"})).await;

    let mut registry = ServiceRegistry::new();
    registry.register("slow", Some(format!("{}/health", slow.uri())));
    registry.register("fast", Some(format!("{}/health", fast.uri())));

    let started = Instant::now();
    let health = aggregator(registry, Duration::from_millis(200))
        .get_system_health()
        .await;

    assert!(started.elapsed() < Duration::from_secs(3));
    assert_eq!(health.status, HealthStatus::Unhealthy);
    assert_eq!(health.services[0].name, "slow");
    assert_eq!(health.services[0].status, HealthStatus::Unhealthy);
    assert!(health.services[0].error.as_deref().unwrap().contains("timed out"));
    assert_eq!(health.services[1].status, HealthStatus::Healthy);
}

#[tokio::test]
async fn disabled_services_are_skipped_and_order_is_kept() {
    let a = mock_health(200, json!({})).await;
    let c = mock_health(200, json!({})).await;

    let mut registry = ServiceRegistry::new();
    registry.register("A", Some(format!("{}/health", a.uri())));
    registry.register("B", None);
    registry.register("C", Some(format!("{}/health", c.uri())));

    let health = aggregator(registry, Duration::from_secs(2))
        .get_system_health()
        .await;

    let names: Vec<&str> = health.services.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["A", "C"]);
}

#[tokio::test]
async fn probe_sends_health_check_user_agent() {
    let mock = MockServer::start().await;
    let expected = format!("agentdeck-health-check/{}", env!("CARGO_PKG_VERSION"));
    Mock::given(method("GET"))
        .and(path("/health"))
        .and(header("user-agent", expected.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&mock)
        .await;

    let mut registry = ServiceRegistry::new();
    registry.register("agent-api", Some(format!("{}/health", mock.uri())));

    let health = aggregator(registry, Duration::from_secs(2))
        .get_system_health()
        .await;

    assert_eq!(health.status, HealthStatus::Healthy);
    // JSON以外のボディは文字列のまま保持する
    assert_eq!(health.services[0].details.as_ref().unwrap()["data"], "ok");
}

#[tokio::test]
async fn ok_disabled_and_timed_out_services_yield_unhealthy_in_order() {
    let a = mock_health(200, json!({"status": "ok"})).await;
    let c = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&c)
        .await;

    let mut registry = ServiceRegistry::new();
    registry.register("A", Some(format!("{}/health", a.uri())));
    registry.register("B", None);
    registry.register("C", Some(format!("{}/health", c.uri())));

    let health = aggregator(registry, Duration::from_millis(200))
        .get_system_health()
        .await;

    let names: Vec<&str> = health.services.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["A", "C"]);
    assert_eq!(health.services[0].status, HealthStatus::Healthy);
    assert_eq!(health.services[1].status, HealthStatus::Unhealthy);
    assert_eq!(health.status, HealthStatus::Unhealthy);
}
