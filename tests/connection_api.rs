//! End-to-end HTTP tests with a stubbed Vault server.
//!
//! The router runs against the real `VaultSecretsClient` (talking to a
//! wiremock server that speaks the KV v2 API) and the in-memory repository.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use credplane::api::build_router;
use credplane::config::VaultConfig;
use credplane::secrets::{ConnectionSecrets, VaultSecretsClient};
use credplane::services::ConnectionService;
use credplane::storage::InMemoryConnectionRepository;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SECRET_PATH: &str = r"^/v1/secret/data/connection/[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$";

fn envelope(data: Value) -> Value {
    json!({
        "request_id": "0d5c1e2a-4a8f-4f0e-8b8e-2f1a9d3c7b61",
        "lease_id": "",
        "renewable": false,
        "lease_duration": 0,
        "data": data,
        "wrap_info": null,
        "warnings": null,
        "auth": null
    })
}

fn version_metadata() -> Value {
    json!({
        "created_time": "2024-03-22T02:24:06.945319214Z",
        "custom_metadata": null,
        "deletion_time": "",
        "destroyed": false,
        "version": 1
    })
}

fn router_for(server: &MockServer) -> Router {
    let vault = VaultSecretsClient::new(&VaultConfig {
        address: server.uri(),
        token: "test-token".to_string(),
        namespace: None,
        mount_path: "secret".to_string(),
    })
    .expect("vault client");

    let service = ConnectionService::new(
        Arc::new(InMemoryConnectionRepository::new()),
        ConnectionSecrets::new(Arc::new(vault)),
        Duration::from_secs(5),
    );
    build_router(Arc::new(service))
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    (status, serde_json::from_slice(&bytes).expect("json body"))
}

fn create_request() -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/connection")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"host": "db1", "port": 5432, "username": "alice", "password": "s3cret"})
                .to_string(),
        ))
        .expect("request")
}

fn fetch_request(id: &str) -> Request<Body> {
    Request::builder().uri(format!("/connection/{}", id)).body(Body::empty()).expect("request")
}

#[tokio::test]
async fn create_writes_password_to_vault_and_fetch_reads_it_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(SECRET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(version_metadata())))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(SECRET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "data": { "password": "s3cret" },
            "metadata": version_metadata()
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let router = router_for(&server);

    let (status, created) = send(&router, create_request()).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().expect("id").to_string();

    let (status, fetched) = send(&router, fetch_request(&id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        fetched,
        json!({"host": "db1", "port": 5432, "username": "alice", "password": "s3cret"})
    );

    // The write payload carries only the password field
    let requests = server.received_requests().await.expect("recorded requests");
    let write = requests.iter().find(|r| r.method.as_str() == "POST").expect("write request");
    let body: Value = serde_json::from_slice(&write.body).expect("write body");
    assert_eq!(body["data"], json!({"password": "s3cret"}));
    assert!(write.url.path().ends_with(&id));
}

#[tokio::test]
async fn vault_failure_on_create_is_internal_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(SECRET_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({ "errors": ["Vault is sealed"] })))
        .mount(&server)
        .await;

    let router = router_for(&server);
    let (status, body) = send(&router, create_request()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal_error");
    assert_eq!(body["message"], "Internal Server Error");
}

#[tokio::test]
async fn missing_vault_entry_is_password_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(SECRET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(version_metadata())))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(SECRET_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "errors": [] })))
        .mount(&server)
        .await;

    let router = router_for(&server);
    let (_, created) = send(&router, create_request()).await;
    let id = created["id"].as_str().expect("id").to_string();

    let (status, body) = send(&router, fetch_request(&id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Password not found");
}
