//! Asana client against a mock HTTP server

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use keyrot_engine::testing::InMemorySecretStore;
use keyrot_engine::{GatewayError, GatewayResult, Notifier};
use keyrot_providers::{AsanaConfig, AsanaTaskClient, OpsNotifier, RetryPolicy, SummaryPublisher};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN_PATH: &str = "/data/credentials/asana_api_key";

fn config(server: &MockServer) -> AsanaConfig {
    AsanaConfig {
        base_url: format!("{}/api/1.0", server.uri()),
        workspace_id: "551227202539".into(),
        timeout: Duration::from_secs(2),
        retry: RetryPolicy {
            max_retries: 2,
            base_delay_ms: 10,
            max_delay_ms: 20,
            multiplier: 2.0,
        },
        ..AsanaConfig::default()
    }
}

fn client(server: &MockServer, secrets: InMemorySecretStore) -> AsanaTaskClient {
    AsanaTaskClient::new(config(server), Arc::new(secrets)).unwrap()
}

fn with_token() -> InMemorySecretStore {
    InMemorySecretStore::new().with_secret(TOKEN_PATH, "asana-token")
}

#[tokio::test]
async fn creates_task_with_bearer_token_and_assignee() {
    // GIVEN: a tracker that only accepts the expected request shape
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/1.0/tasks"))
        .and(header("authorization", "Bearer asana-token"))
        .and(body_partial_json(json!({
            "data": {
                "name": "AWS IAM Key Rotation 2/4/2025",
                "workspace": "551227202539",
                "assignee": "1207",
                "due_on": "2025-02-04"
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": { "gid": "42", "permalink_url": "https://app.asana.com/0/0/42" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN
    let today = Utc.with_ymd_and_hms(2025, 1, 25, 12, 0, 0).unwrap();
    let receipt = client(&server, with_token())
        .create_task_at("alice", "/keys/alice", "1207", today)
        .await
        .unwrap();

    // THEN
    assert_eq!(receipt.url.as_deref(), Some("https://app.asana.com/0/0/42"));
}

#[tokio::test]
async fn client_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/1.0/tasks"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server, with_token())
        .create_task("alice", "/keys/alice", "1207")
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Http { status: 401, .. }), "{err}");
}

#[tokio::test]
async fn server_error_is_retried_until_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/1.0/tasks"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let err = client(&server, with_token())
        .create_task("alice", "/keys/alice", "1207")
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Http { status: 503, .. }));
}

#[tokio::test]
async fn missing_token_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server, InMemorySecretStore::new())
        .create_task("alice", "/keys/alice", "1207")
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::NoResponse { .. }));
}

#[derive(Clone, Default)]
struct Collect(Arc<Mutex<Vec<String>>>);

#[async_trait]
impl SummaryPublisher for Collect {
    async fn publish(&self, subject: &str, _body: &str) -> GatewayResult<()> {
        self.0.lock().push(subject.to_string());
        Ok(())
    }
}

#[tokio::test]
async fn ops_notifier_routes_tasks_and_summaries() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/1.0/tasks"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "data": { "gid": "7" } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let published = Collect::default();
    let notifier = OpsNotifier::new(
        published.clone(),
        Arc::new(client(&server, with_token())),
    );

    let receipt = notifier
        .create_task("alice", "/keys/alice", "1207")
        .await
        .unwrap();
    notifier
        .publish_summary("IAM Key Rotation Logs 1/15/2025", "body")
        .await
        .unwrap();

    assert_eq!(receipt.url, None);
    assert_eq!(
        *published.0.lock(),
        vec!["IAM Key Rotation Logs 1/15/2025".to_string()]
    );
}
