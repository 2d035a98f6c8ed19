//! Problem responses produced by the demo resource

mod harness;

use harness::server::TestServer;
use serde_json::json;

async fn problem(resp: reqwest::Response, status: u16) -> serde_json::Value {
    assert_eq!(resp.status(), status);
    assert_eq!(resp.headers()["content-type"], "application/problem+json");
    resp.json().await.unwrap()
}

#[tokio::test]
async fn demo_error_returns_problem_details() {
    let server = TestServer::start_default().await.unwrap();

    let resp = server.client().get(server.url("/api/demo/error")).send().await.unwrap();
    let body = problem(resp, 400).await;

    assert_eq!(body["type"], "https://wiki.abstratium.dev/errors/ERR-1000");
    assert_eq!(body["title"], "Demo error for testing");
    assert_eq!(body["status"], 400);
    assert!(
        body["detail"]
            .as_str()
            .unwrap()
            .contains("RFC 7807 Problem Details")
    );
}

#[tokio::test]
async fn demo_crud_round() {
    let server = TestServer::start_default().await.unwrap();
    let client = server.client();
    let url = server.url("/api/demo");

    let created: serde_json::Value = client
        .post(&url)
        .json(&json!({ "id": "alpha" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(created, json!({ "id": "alpha" }));

    let generated: serde_json::Value = client.post(&url).json(&json!({})).send().await.unwrap().json().await.unwrap();
    assert!(!generated["id"].as_str().unwrap().is_empty());

    let listed: serde_json::Value = client.get(&url).send().await.unwrap().json().await.unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 2);

    let updated = client.put(&url).json(&json!({ "id": "alpha" })).send().await.unwrap();
    assert_eq!(updated.status(), 200);

    let deleted = client.delete(server.url("/api/demo/alpha")).send().await.unwrap();
    assert_eq!(deleted.status(), 204);
}

#[tokio::test]
async fn duplicate_demo_is_conflict() {
    let server = TestServer::start_default().await.unwrap();
    let url = server.url("/api/demo");

    server.client().post(&url).json(&json!({ "id": "dup" })).send().await.unwrap();
    let resp = server.client().post(&url).json(&json!({ "id": "dup" })).send().await.unwrap();

    let body = problem(resp, 409).await;
    assert_eq!(body["type"], "https://wiki.abstratium.dev/errors/ERR-4001");
}

#[tokio::test]
async fn unknown_demo_is_not_found() {
    let server = TestServer::start_default().await.unwrap();

    let resp = server
        .client()
        .put(server.url("/api/demo"))
        .json(&json!({ "id": "ghost" }))
        .send()
        .await
        .unwrap();
    let body = problem(resp, 404).await;
    assert_eq!(body["type"], "https://wiki.abstratium.dev/errors/ERR-1001");

    let resp = server.client().delete(server.url("/api/demo/ghost")).send().await.unwrap();
    problem(resp, 404).await;
}

#[tokio::test]
async fn empty_id_update_is_invalid_input() {
    let server = TestServer::start_default().await.unwrap();

    let resp = server
        .client()
        .put(server.url("/api/demo"))
        .json(&json!({ "id": "" }))
        .send()
        .await
        .unwrap();
    let body = problem(resp, 400).await;
    assert_eq!(body["type"], "https://wiki.abstratium.dev/errors/ERR-1002");
}

#[tokio::test]
async fn malformed_body_is_invalid_format() {
    let server = TestServer::start_default().await.unwrap();

    let resp = server
        .client()
        .post(server.url("/api/demo"))
        .header("Content-Type", "application/json")
        .body("{\"id\": ")
        .send()
        .await
        .unwrap();
    let body = problem(resp, 400).await;
    assert_eq!(body["type"], "https://wiki.abstratium.dev/errors/ERR-3002");
    assert_eq!(body["title"], "Invalid data format");
}

#[tokio::test]
async fn missing_content_type_is_invalid_format() {
    let server = TestServer::start_default().await.unwrap();

    let resp = server.client().post(server.url("/api/demo")).body("{}").send().await.unwrap();
    let body = problem(resp, 415).await;
    assert_eq!(body["type"], "https://wiki.abstratium.dev/errors/ERR-3002");
}

#[tokio::test]
async fn unsupported_method_is_problem() {
    let server = TestServer::start_default().await.unwrap();

    let resp = server.client().patch(server.url("/api/demo")).send().await.unwrap();
    let body = problem(resp, 405).await;
    assert_eq!(body["instance"], "/api/demo");
}

#[tokio::test]
async fn undecodable_path_parameter_is_invalid_format() {
    let server = TestServer::start_default().await.unwrap();

    let resp = server.request(reqwest::Method::DELETE, "/api/demo/%FF").send().await.unwrap();
    let body = problem(resp, 400).await;
    assert_eq!(body["type"], "https://wiki.abstratium.dev/errors/ERR-3002");
    assert_eq!(body["title"], "Invalid data format");
}
