//! エージェント管理クライアント統合テスト

use agentdeck::agents::AgentClient;
use agentdeck::common::error::DeckError;
use agentdeck::types::agent::AgentStatus;
use serde_json::json;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn list_parses_agents() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/agents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a1", "name": "Researcher", "type": "research", "status": "running",
             "lastActivity": "2024-01-01T00:00:00Z"},
            {"id": "a2", "name": "Writer", "type": "writer", "status": "paused"}
        ])))
        .mount(&mock)
        .await;

    let client = AgentClient::new(mock.uri()).unwrap();
    let agents = client.list().await.unwrap();

    assert_eq!(agents.len(), 2);
    assert_eq!(agents[0].status, AgentStatus::Running);
    assert!(agents[0].last_activity.is_some());
    assert_eq!(agents[1].status, AgentStatus::Unknown);
}

#[tokio::test]
async fn actions_use_expected_routes() {
    let mock = MockServer::start().await;
    for action in ["start", "stop", "restart"] {
        Mock::given(method("POST"))
            .and(path(format!("/api/agents/a1/{}", action)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&mock)
            .await;
    }
    Mock::given(method("DELETE"))
        .and(path("/api/agents/a1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock)
        .await;

    let client = AgentClient::new(mock.uri()).unwrap();

    assert!(client.start("a1").await.unwrap().success);
    assert!(client.stop("a1").await.unwrap().success);
    assert!(client.restart("a1").await.unwrap().success);
    assert!(client.delete("a1").await.unwrap().success);
}

#[tokio::test]
async fn rejected_action_is_returned_as_data() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/agents/a1/stop"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "error": "agent busy"})),
        )
        .mount(&mock)
        .await;

    let client = AgentClient::new(mock.uri()).unwrap();
    let result = client.stop("a1").await.unwrap();

    assert!(!result.success);
    assert_eq!(result.message.as_deref(), Some("agent busy"));
}

#[tokio::test]
async fn non_success_status_becomes_typed_error() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/agents/a1/start"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock)
        .await;

    let client = AgentClient::new(mock.uri()).unwrap();

    let missing = client.start("missing").await.unwrap_err();
    assert!(matches!(missing, DeckError::NotFound(_)));

    let failed = client.start("a1").await.unwrap_err();
    assert!(matches!(failed, DeckError::Upstream(_)));
}

#[tokio::test]
async fn unreachable_api_is_http_error() {
    let client = AgentClient::new("http://127.0.0.1:1").unwrap();

    let err = client.list().await.unwrap_err();

    assert!(matches!(err, DeckError::Http(_)));
}

#[tokio::test]
async fn reserved_characters_in_id_stay_in_one_segment() {
    let mock = MockServer::start().await;
    for encoded in ["/api/agents/victim%23/stop", "/api/agents/..%2Fadmin/stop"] {
        Mock::given(method("POST"))
            .and(path(encoded))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&mock)
            .await;
    }
    for other in ["/api/agents/victim/stop", "/api/admin/stop"] {
        Mock::given(method("POST"))
            .and(path(other))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(0)
            .mount(&mock)
            .await;
    }

    let client = AgentClient::new(mock.uri()).unwrap();

    assert!(client.stop("victim#").await.unwrap().success);
    assert!(client.stop("../admin").await.unwrap().success);
}

#[tokio::test]
async fn dot_segment_id_is_rejected_without_request() {
    let mock = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(0)
        .mount(&mock)
        .await;

    let client = AgentClient::new(mock.uri()).unwrap();

    let err = client.delete("..").await.unwrap_err();
    assert!(matches!(err, DeckError::Common(_)));
}
